use crate::*;
use derive_more::From;

#[derive(Debug, Clone, PartialEq)]
pub struct LiteralExpressionSegment {
    pub start: usize,
    pub stop: usize,
    pub value: Value,
}

/// A `?` marker, `parameter_index` is its position in the parameter list.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParameterMarkerExpressionSegment {
    pub start: usize,
    pub stop: usize,
    pub parameter_index: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BinaryOperationExpression {
    pub start: usize,
    pub stop: usize,
    pub left: Box<ExpressionSegment>,
    /// Operator as written, e.g. `=`, `AND`, `NOT LIKE`.
    pub operator: String,
    pub right: Box<ExpressionSegment>,
}

impl BinaryOperationExpression {
    pub fn is_like(&self) -> bool {
        let operator = self.operator.split_whitespace().collect::<Vec<_>>().join(" ");
        operator.eq_ignore_ascii_case("LIKE") || operator.eq_ignore_ascii_case("NOT LIKE")
    }

    pub fn is_logical(&self) -> bool {
        ["AND", "OR", "&&", "||"]
            .iter()
            .any(|each| self.operator.eq_ignore_ascii_case(each))
    }

    pub fn is_comparison(&self) -> bool {
        matches!(self.operator.as_str(), "=" | "<>" | "!=" | "<=>")
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct InExpression {
    pub start: usize,
    pub stop: usize,
    pub left: Box<ExpressionSegment>,
    /// Usually a [`ListExpression`].
    pub right: Box<ExpressionSegment>,
    pub not: bool,
}

/// `(a, b, c)`, the span includes the parentheses.
#[derive(Debug, Clone, PartialEq)]
pub struct ListExpression {
    pub start: usize,
    pub stop: usize,
    pub items: Vec<ExpressionSegment>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct FunctionSegment {
    pub start: usize,
    pub stop: usize,
    pub name: String,
    pub parameters: Vec<ExpressionSegment>,
    pub text: String,
}

/// Anything the rewrite never looks into, including subqueries, whose
/// select contexts are listed on the enclosing statement instead.
#[derive(Debug, Clone, PartialEq)]
pub struct CommonExpressionSegment {
    pub start: usize,
    pub stop: usize,
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, From)]
pub enum ExpressionSegment {
    Column(ColumnSegment),
    Literal(LiteralExpressionSegment),
    ParameterMarker(ParameterMarkerExpressionSegment),
    Binary(BinaryOperationExpression),
    In(InExpression),
    List(ListExpression),
    Function(FunctionSegment),
    Common(CommonExpressionSegment),
}

impl ExpressionSegment {
    pub fn start(&self) -> usize {
        match self {
            ExpressionSegment::Column(each) => each.start,
            ExpressionSegment::Literal(each) => each.start,
            ExpressionSegment::ParameterMarker(each) => each.start,
            ExpressionSegment::Binary(each) => each.start,
            ExpressionSegment::In(each) => each.start,
            ExpressionSegment::List(each) => each.start,
            ExpressionSegment::Function(each) => each.start,
            ExpressionSegment::Common(each) => each.start,
        }
    }

    pub fn stop(&self) -> usize {
        match self {
            ExpressionSegment::Column(each) => each.stop,
            ExpressionSegment::Literal(each) => each.stop,
            ExpressionSegment::ParameterMarker(each) => each.stop,
            ExpressionSegment::Binary(each) => each.stop,
            ExpressionSegment::In(each) => each.stop,
            ExpressionSegment::List(each) => each.stop,
            ExpressionSegment::Function(each) => each.stop,
            ExpressionSegment::Common(each) => each.stop,
        }
    }

    pub fn as_column(&self) -> Option<&ColumnSegment> {
        match self {
            ExpressionSegment::Column(column) => Some(column),
            _ => None,
        }
    }

    /// Column references of this expression, left to right.
    pub fn columns(&self) -> Vec<&ColumnSegment> {
        let mut result = Vec::new();
        self.collect_columns(&mut result);
        result
    }

    fn collect_columns<'a>(&'a self, result: &mut Vec<&'a ColumnSegment>) {
        match self {
            ExpressionSegment::Column(column) => result.push(column),
            ExpressionSegment::Binary(binary) => {
                binary.left.collect_columns(result);
                binary.right.collect_columns(result);
            }
            ExpressionSegment::In(in_expression) => {
                in_expression.left.collect_columns(result);
                in_expression.right.collect_columns(result);
            }
            ExpressionSegment::List(list) => list.items.iter().for_each(|each| each.collect_columns(result)),
            ExpressionSegment::Function(function) => function
                .parameters
                .iter()
                .for_each(|each| each.collect_columns(result)),
            ExpressionSegment::Literal(_)
            | ExpressionSegment::ParameterMarker(_)
            | ExpressionSegment::Common(_) => {}
        }
    }

    /// Every binary expression in this tree, outermost first.
    pub fn binary_expressions(&self) -> Vec<&BinaryOperationExpression> {
        let mut result = Vec::new();
        self.collect_binaries(&mut result);
        result
    }

    fn collect_binaries<'a>(&'a self, result: &mut Vec<&'a BinaryOperationExpression>) {
        match self {
            ExpressionSegment::Binary(binary) => {
                result.push(binary);
                binary.left.collect_binaries(result);
                binary.right.collect_binaries(result);
            }
            ExpressionSegment::In(in_expression) => {
                in_expression.left.collect_binaries(result);
                in_expression.right.collect_binaries(result);
            }
            ExpressionSegment::List(list) => list.items.iter().for_each(|each| each.collect_binaries(result)),
            ExpressionSegment::Function(function) => function
                .parameters
                .iter()
                .for_each(|each| each.collect_binaries(result)),
            ExpressionSegment::Column(_)
            | ExpressionSegment::Literal(_)
            | ExpressionSegment::ParameterMarker(_)
            | ExpressionSegment::Common(_) => {}
        }
    }
}
