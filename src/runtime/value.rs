use std::cell::RefCell;
use std::fmt;
use std::rc::Rc;

use crate::error::ValueError;
use crate::runtime::function::FunValue;
use crate::runtime::list::List;

/// The binary operations every value kind answers to, named the way the
/// failure messages spell them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, strum::Display)]
pub enum Operation {
    #[strum(serialize = "addition")]
    Add,
    #[strum(serialize = "concatenation")]
    Concat,
    #[strum(serialize = "subtraction")]
    Sub,
    #[strum(serialize = "multiplication")]
    Mul,
    #[strum(serialize = "division")]
    Div,
    #[strum(serialize = "modulus")]
    Mod,
    #[strum(serialize = "bitwise AND")]
    BitAnd,
    #[strum(serialize = "bitwise OR")]
    BitOr,
    #[strum(serialize = "bitwise XOR")]
    BitXor,
    #[strum(serialize = "equality")]
    Equals,
    #[strum(serialize = "inequality")]
    NotEquals,
    #[strum(serialize = "greater than")]
    GreaterThan,
    #[strum(serialize = "lesser than")]
    LesserThan,
}

/// A runtime value. Closed set: every operation below matches exhaustively
/// over the kind pair, so a new kind forces every operator site to be
/// revisited.
///
/// Lists live behind `Rc<RefCell<…>>` because `concat`, `append`, and `pop`
/// mutate in place and the mutation must be visible through every alias the
/// evaluator holds.
#[derive(Clone, Debug)]
pub enum Value {
    Number(f32),
    List(Rc<RefCell<List>>),
    Function(FunValue),
}

impl Value {
    pub fn list(values: impl IntoIterator<Item = Value>) -> Self {
        Self::List(Rc::new(RefCell::new(values.into_iter().collect())))
    }

    pub fn function(callback: impl Fn(&[Value]) + 'static) -> Self {
        Self::Function(FunValue::new(callback))
    }

    /// Comparisons answer numerically; the model has no boolean kind.
    fn truth(condition: bool) -> Self {
        Self::Number(if condition { 1.0 } else { 0.0 })
    }

    pub fn type_name(&self) -> &'static str {
        match self {
            Self::Number(_) => "number",
            Self::List(_) => "list",
            Self::Function(_) => "fun",
        }
    }

    pub fn as_number(&self) -> Option<f32> {
        match self {
            Self::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_list(&self) -> Option<Rc<RefCell<List>>> {
        match self {
            Self::List(items) => Some(Rc::clone(items)),
            _ => None,
        }
    }

    pub fn as_function(&self) -> Option<&FunValue> {
        match self {
            Self::Function(fun) => Some(fun),
            _ => None,
        }
    }

    fn unsupported(&self, operation: Operation) -> ValueError {
        ValueError::UnsupportedOperation {
            type_name: self.type_name(),
            operation,
        }
    }

    pub fn add(&self, other: &Self) -> Result<Self, ValueError> {
        self.scalar_op(other, Operation::Add, &|a, b| a + b)
    }

    pub fn sub(&self, other: &Self) -> Result<Self, ValueError> {
        self.scalar_op(other, Operation::Sub, &|a, b| a - b)
    }

    pub fn mul(&self, other: &Self) -> Result<Self, ValueError> {
        self.scalar_op(other, Operation::Mul, &|a, b| a * b)
    }

    pub fn div(&self, other: &Self) -> Result<Self, ValueError> {
        self.scalar_op(other, Operation::Div, &|a, b| a / b)
    }

    pub fn modulo(&self, other: &Self) -> Result<Self, ValueError> {
        self.scalar_op(other, Operation::Mod, &|a, b| a % b)
    }

    pub fn bit_and(&self, other: &Self) -> Result<Self, ValueError> {
        self.scalar_op(other, Operation::BitAnd, &|a, b| bitwise(a, b, |x, y| x & y))
    }

    pub fn bit_or(&self, other: &Self) -> Result<Self, ValueError> {
        self.scalar_op(other, Operation::BitOr, &|a, b| bitwise(a, b, |x, y| x | y))
    }

    pub fn bit_xor(&self, other: &Self) -> Result<Self, ValueError> {
        self.scalar_op(other, Operation::BitXor, &|a, b| bitwise(a, b, |x, y| x ^ y))
    }

    /// Shared dispatch for the broadcastable scalar operations.
    ///
    /// Two numbers apply the native f32 operation. A number facing anything
    /// else delegates to the other operand with itself as the argument (role
    /// reversal), so mixed operations are resolved by the non-number side. A
    /// list broadcasts over a scalar into a new list, combines element-wise
    /// with a list of equal length, and rejects a list of any other length.
    /// Functions support none of these.
    fn scalar_op(
        &self,
        other: &Self,
        operation: Operation,
        apply: &dyn Fn(f32, f32) -> f32,
    ) -> Result<Self, ValueError> {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => Ok(Self::Number(apply(*a, *b))),
            (Self::Number(_), _) => other.scalar_op(self, operation, apply),
            (Self::List(items), Self::List(other_items)) => {
                let left = items.borrow();
                let right = other_items.borrow();
                if left.len() != right.len() {
                    return Err(ValueError::LengthMismatch {
                        operation,
                        left: left.len(),
                        right: right.len(),
                    });
                }
                let mut mapped = List::new();
                for (a, b) in left.iter().zip(right.iter()) {
                    mapped.append(a.scalar_op(b, operation, apply)?);
                }
                Ok(Self::List(Rc::new(RefCell::new(mapped))))
            }
            (Self::List(items), _) => {
                let mut mapped = List::new();
                for element in items.borrow().iter() {
                    mapped.append(element.scalar_op(other, operation, apply)?);
                }
                Ok(Self::List(Rc::new(RefCell::new(mapped))))
            }
            (Self::Function(_), _) => Err(self.unsupported(operation)),
        }
    }

    /// Concat mutates a receiver list in place and returns an alias of it:
    /// every element of a list operand is appended, any other operand is
    /// appended as a single element. Numbers delegate to the other side;
    /// two numbers, or a function receiver, cannot concatenate.
    pub fn concat(&self, other: &Self) -> Result<Self, ValueError> {
        match (self, other) {
            (Self::Number(_), Self::Number(_)) => Err(self.unsupported(Operation::Concat)),
            (Self::Number(_), _) => other.concat(self),
            (Self::List(items), Self::List(other_items)) => {
                // Snapshot first so concatenating a list onto itself cannot
                // alias the borrow (or loop forever).
                let incoming: Vec<Value> = other_items.borrow().iter().cloned().collect();
                let mut receiver = items.borrow_mut();
                for value in incoming {
                    receiver.append(value);
                }
                drop(receiver);
                Ok(Self::List(Rc::clone(items)))
            }
            (Self::List(items), _) => {
                items.borrow_mut().append(other.clone());
                Ok(Self::List(Rc::clone(items)))
            }
            (Self::Function(_), _) => Err(self.unsupported(Operation::Concat)),
        }
    }

    pub fn equals(&self, other: &Self) -> Result<Self, ValueError> {
        Ok(Self::truth(self.deep_eq(other)))
    }

    pub fn not_equals(&self, other: &Self) -> Result<Self, ValueError> {
        Ok(Self::truth(!self.deep_eq(other)))
    }

    /// Deep, order-sensitive equality. Numbers compare exactly (NaN is
    /// unequal to everything, itself included), lists compare element-wise,
    /// functions compare by fingerprint; different kinds are never equal.
    fn deep_eq(&self, other: &Self) -> bool {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => a == b,
            (Self::List(a), Self::List(b)) => {
                let left = a.borrow();
                let right = b.borrow();
                left.len() == right.len()
                    && left.iter().zip(right.iter()).all(|(x, y)| x.deep_eq(y))
            }
            (Self::Function(a), Self::Function(b)) => a == b,
            _ => false,
        }
    }

    pub fn greater_than(&self, other: &Self) -> Result<Self, ValueError> {
        self.compare(other, Operation::GreaterThan, &|a, b| a > b)
    }

    pub fn lesser_than(&self, other: &Self) -> Result<Self, ValueError> {
        self.compare(other, Operation::LesserThan, &|a, b| a < b)
    }

    /// Ordering is defined between numbers only; the number side delegates
    /// so the unsupported kind names itself in the error.
    fn compare(
        &self,
        other: &Self,
        operation: Operation,
        apply: &dyn Fn(f32, f32) -> bool,
    ) -> Result<Self, ValueError> {
        match (self, other) {
            (Self::Number(a), Self::Number(b)) => Ok(Self::truth(apply(*a, *b))),
            (Self::Number(_), _) => other.compare(self, operation, apply),
            (Self::List(_), _) | (Self::Function(_), _) => Err(self.unsupported(operation)),
        }
    }
}

/// Bitwise operands truncate toward zero to 32-bit integers and the result
/// widens back.
fn bitwise(a: f32, b: f32, apply: impl Fn(i32, i32) -> i32) -> f32 {
    apply(a as i32, b as i32) as f32
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Number(n) => write!(f, "{n}"),
            Self::List(items) => {
                let formatted: Vec<String> =
                    items.borrow().iter().map(Value::to_string).collect();
                write!(f, "[ {} ]", formatted.join(", "))
            }
            Self::Function(fun) => write!(f, "{fun}"),
        }
    }
}
