//! Turns textual arithmetic expressions into binary syntax trees, repairing
//! operator precedence with local rotations as the parse recursion unwinds.

pub mod parser;
