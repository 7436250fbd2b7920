/// AST (Abstract Syntax Tree) module
/// Contains all definitions related to the tree the parser builds
///
/// Submodules:
/// - ast: The node sum type and the program container
/// - release: Child traversal and subtree teardown
/// - printer: Source-like rendering of nodes for debugging
pub mod ast;
pub mod printer;
pub mod release;
