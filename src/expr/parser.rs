//! Shunting-yard parser producing the typed AST

use crate::diag::DefineError;

use super::lexer::{tokenize, Token};
use super::{bad, Ast, BinOp, Func1, Func2};

/// Operator-stack entries.
#[derive(Debug, Clone, PartialEq)]
enum StackOp {
    Bin(BinOp),
    Neg,
    Not,
    /// Function call marker; the opening paren is pushed right after.
    Func(String),
    Paren,
}

fn precedence(op: BinOp) -> u8 {
    match op {
        BinOp::Mul | BinOp::Div | BinOp::Rem => 6,
        BinOp::Add | BinOp::Sub => 5,
        BinOp::Lt | BinOp::Le | BinOp::Gt | BinOp::Ge => 4,
        BinOp::Eq | BinOp::Ne => 3,
        BinOp::And => 2,
        BinOp::Or => 1,
    }
}

fn binop_of(token: &Token) -> Option<BinOp> {
    Some(match token {
        Token::Plus => BinOp::Add,
        Token::Minus => BinOp::Sub,
        Token::Star => BinOp::Mul,
        Token::Slash => BinOp::Div,
        Token::Percent => BinOp::Rem,
        Token::EqEq => BinOp::Eq,
        Token::NotEq => BinOp::Ne,
        Token::Lt => BinOp::Lt,
        Token::Le => BinOp::Le,
        Token::Gt => BinOp::Gt,
        Token::Ge => BinOp::Ge,
        Token::AndAnd => BinOp::And,
        Token::OrOr => BinOp::Or,
        _ => return None,
    })
}

fn func1_of(name: &str) -> Option<Func1> {
    Some(match name {
        "abs" => Func1::Abs,
        "floor" => Func1::Floor,
        "ceil" => Func1::Ceil,
        "round" => Func1::Round,
        "trunc" => Func1::Trunc,
        "sign" => Func1::Sign,
        "sqrt" => Func1::Sqrt,
        "exp" => Func1::Exp,
        "log" => Func1::Log,
        "log2" => Func1::Log2,
        "log10" => Func1::Log10,
        "isint" => Func1::IsInt,
        "isfinite" => Func1::IsFinite,
        "isnan" => Func1::IsNan,
        _ => return None,
    })
}

fn func2_of(name: &str) -> Option<Func2> {
    Some(match name {
        "min" => Func2::Min,
        "max" => Func2::Max,
        "pow" => Func2::Pow,
        _ => return None,
    })
}

struct Parser<'a> {
    src: &'a str,
    output: Vec<Ast>,
    ops: Vec<StackOp>,
    /// One slot per open function call: arguments seen so far.
    arg_counts: Vec<usize>,
}

impl<'a> Parser<'a> {
    fn apply(&mut self, op: StackOp) -> Result<(), DefineError> {
        match op {
            StackOp::Neg => {
                let a = self.pop_operand()?;
                self.output.push(Ast::Neg(Box::new(a)));
            }
            StackOp::Not => {
                let a = self.pop_operand()?;
                self.output.push(Ast::Not(Box::new(a)));
            }
            StackOp::Bin(bin) => {
                let b = self.pop_operand()?;
                let a = self.pop_operand()?;
                self.output.push(Ast::Bin(bin, Box::new(a), Box::new(b)));
            }
            StackOp::Func(_) | StackOp::Paren => {
                return Err(bad(self.src, "unbalanced parentheses"));
            }
        }
        Ok(())
    }

    fn pop_operand(&mut self) -> Result<Ast, DefineError> {
        self.output
            .pop()
            .ok_or_else(|| bad(self.src, "missing operand"))
    }

    /// Pops and applies operators until the innermost open paren.
    /// Returns whether a paren was found (it is left on the stack).
    fn unwind_to_paren(&mut self) -> Result<bool, DefineError> {
        while let Some(top) = self.ops.last() {
            if *top == StackOp::Paren {
                return Ok(true);
            }
            let op = self.ops.pop().expect("stack top exists");
            self.apply(op)?;
        }
        Ok(false)
    }

    fn finish_call(&mut self, name: String) -> Result<(), DefineError> {
        let argc = self
            .arg_counts
            .pop()
            .ok_or_else(|| bad(self.src, "call bookkeeping underflow"))?;
        if let Some(f) = func1_of(&name) {
            if argc != 1 {
                return Err(bad(
                    self.src,
                    format!("{} takes 1 argument, got {}", name, argc),
                ));
            }
            let a = self.pop_operand()?;
            self.output.push(Ast::Call1(f, Box::new(a)));
        } else if let Some(f) = func2_of(&name) {
            if argc != 2 {
                return Err(bad(
                    self.src,
                    format!("{} takes 2 arguments, got {}", name, argc),
                ));
            }
            let b = self.pop_operand()?;
            let a = self.pop_operand()?;
            self.output.push(Ast::Call2(f, Box::new(a), Box::new(b)));
        } else {
            return Err(bad(self.src, format!("unknown function '{}'", name)));
        }
        Ok(())
    }
}

/// Compiles an expression string into an AST.
///
/// Errors on unknown identifiers or operators, arity mismatches, and
/// any structural malformation. The only free variable is `x`.
pub fn compile(src: &str) -> Result<Ast, DefineError> {
    let tokens = tokenize(src)?;
    let mut p = Parser {
        src,
        output: Vec::new(),
        ops: Vec::new(),
        arg_counts: Vec::new(),
    };
    // True when the next token must start an operand.
    let mut expect_operand = true;

    let mut iter = tokens.iter().peekable();
    while let Some(token) = iter.next() {
        match token {
            Token::Num(n) => {
                if !expect_operand {
                    return Err(bad(src, "unexpected numeric literal"));
                }
                p.output.push(Ast::Num(*n));
                expect_operand = false;
            }
            Token::Ident(name) => {
                if !expect_operand {
                    return Err(bad(src, format!("unexpected identifier '{}'", name)));
                }
                if iter.peek() == Some(&&Token::LParen) {
                    if func1_of(name).is_none() && func2_of(name).is_none() {
                        return Err(bad(src, format!("unknown function '{}'", name)));
                    }
                    iter.next();
                    p.ops.push(StackOp::Func(name.clone()));
                    p.ops.push(StackOp::Paren);
                    p.arg_counts.push(1);
                    expect_operand = true;
                } else if name == "x" {
                    p.output.push(Ast::Var);
                    expect_operand = false;
                } else {
                    return Err(bad(src, format!("unknown identifier '{}'", name)));
                }
            }
            Token::Not => {
                if !expect_operand {
                    return Err(bad(src, "'!' must precede an operand"));
                }
                p.ops.push(StackOp::Not);
            }
            Token::Minus if expect_operand => {
                p.ops.push(StackOp::Neg);
            }
            Token::LParen => {
                if !expect_operand {
                    return Err(bad(src, "unexpected '('"));
                }
                p.ops.push(StackOp::Paren);
            }
            Token::RParen => {
                if expect_operand {
                    return Err(bad(src, "expected an operand before ')'"));
                }
                if !p.unwind_to_paren()? {
                    return Err(bad(src, "unmatched ')'"));
                }
                p.ops.pop();
                if let Some(StackOp::Func(_)) = p.ops.last() {
                    let name = match p.ops.pop() {
                        Some(StackOp::Func(name)) => name,
                        _ => unreachable!(),
                    };
                    p.finish_call(name)?;
                }
                expect_operand = false;
            }
            Token::Comma => {
                if expect_operand {
                    return Err(bad(src, "expected an operand before ','"));
                }
                if !p.unwind_to_paren()? {
                    return Err(bad(src, "',' outside of a call"));
                }
                // The paren must belong to a function call.
                let below = p.ops.len().checked_sub(2).map(|i| &p.ops[i]);
                match below {
                    Some(StackOp::Func(_)) => {}
                    _ => return Err(bad(src, "',' outside of a call")),
                }
                let count = p
                    .arg_counts
                    .last_mut()
                    .ok_or_else(|| bad(src, "',' outside of a call"))?;
                *count += 1;
                expect_operand = true;
            }
            other => {
                let bin = binop_of(other)
                    .ok_or_else(|| bad(src, "unexpected token"))?;
                if expect_operand {
                    return Err(bad(src, "operator in operand position"));
                }
                while let Some(top) = p.ops.last() {
                    let reduce = match top {
                        StackOp::Neg | StackOp::Not => true,
                        StackOp::Bin(other_bin) => precedence(*other_bin) >= precedence(bin),
                        StackOp::Func(_) | StackOp::Paren => false,
                    };
                    if !reduce {
                        break;
                    }
                    let op = p.ops.pop().expect("stack top exists");
                    p.apply(op)?;
                }
                p.ops.push(StackOp::Bin(bin));
                expect_operand = true;
            }
        }
    }

    if expect_operand {
        return Err(bad(src, "expression is incomplete"));
    }
    while let Some(op) = p.ops.pop() {
        if matches!(op, StackOp::Paren | StackOp::Func(_)) {
            return Err(bad(src, "unbalanced parentheses"));
        }
        p.apply(op)?;
    }
    match (p.output.pop(), p.output.is_empty()) {
        (Some(ast), true) => Ok(ast),
        _ => Err(bad(src, "malformed expression")),
    }
}
