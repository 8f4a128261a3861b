//! # Syntax trees for the S-expression front end
//!
//! The input is the printed form of a Ruby parser tree, for example:
//!
//! ```text
//! (:begin
//!   (:lvasgn :greeting (:str "hi"))
//!   (:send nil :puts (:lvar :greeting)))
//! ```
//!
//! Three layers live here:
//!
//! - **[tokens]** - lexical tokens produced by the lexer
//! - **[node]** - the generic tagged tree the parser builds
//! - **[form]** - nodes with their semantic tag resolved into a closed enum,
//!   the shape the transpiler dispatches on
pub mod form;
pub mod node;
pub mod tokens;

pub use form::{Form, PrintRoutine};
pub use node::Node;
pub use tokens::{Token, TokenKind};
