use crate::parser::error::ParseError;
use crate::parser::operator;
use crate::parser::token::{Token, TokenKind};
use ptree::{write_tree, TreeBuilder};
use std::fmt;
use std::fmt::{Display, Formatter};

/// Index of a node within the arena of the [ExpressionTree] that created it.
/// Ids are meaningless for any other tree.
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct NodeId(usize);

#[derive(Debug, Clone)]
struct ExpressionNode {
    token: Token,
    left: Option<NodeId>,
    right: Option<NodeId>,
}

/// A binary expression tree with operator precedence already resolved.
///
/// Nodes live in an arena and refer to their children by index, so the
/// precedence repair rotations during construction are plain reassignments
/// of two index fields. Once returned from [ExpressionTree::new] the tree is
/// immutable.
///
/// Equality is structural: two trees are equal when their shapes and tokens
/// match, regardless of arena layout.
#[derive(Debug, Clone)]
pub struct ExpressionTree {
    nodes: Vec<ExpressionNode>,
    root: Option<NodeId>,
}

impl ExpressionTree {
    /// Builds the tree for an ordered infix token sequence of numbers and
    /// operators.
    ///
    /// The raw build is right-leaning: the first operator takes everything
    /// after it as its right subtree. As each recursive call returns, a local
    /// left rotation lifts the right child whenever it binds no tighter than
    /// its parent, which left-associates chains of equal precedence and puts
    /// tighter-binding operators deeper in the tree.
    ///
    /// # Arguments
    ///
    /// * `tokens`: The tokens to build from, in infix order. Parentheses and
    ///   end-of-input markers must have been filtered out beforehand.
    ///
    /// returns: The finished tree, which is empty if `tokens` was.
    ///
    /// # Examples
    ///
    /// ```
    /// use rotation_parser::parser::expression_tree::ExpressionTree;
    /// use rotation_parser::parser::token::Token;
    /// # use anyhow::Result;
    ///
    /// # fn main() -> Result<()> {
    /// let tokens = vec![
    ///     Token::number("12"),
    ///     Token::operator("*"),
    ///     Token::number("5"),
    /// ];
    /// let tree = ExpressionTree::new(tokens)?;
    /// print!("{}", tree);
    /// # Ok::<(), anyhow::Error>(()) }
    /// ```
    pub fn new(tokens: Vec<Token>) -> Result<ExpressionTree, ParseError> {
        let mut tree = ExpressionTree {
            nodes: Vec::with_capacity(tokens.len()),
            root: None,
        };
        tree.root = tree.parse_tokens(&tokens)?;
        Ok(tree)
    }

    pub fn root(&self) -> Option<NodeId> {
        self.root
    }

    pub fn is_empty(&self) -> bool {
        self.root.is_none()
    }

    pub fn token_of(&self, id: NodeId) -> &Token {
        &self.nodes[id.0].token
    }

    pub fn left_child_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].left
    }

    pub fn right_child_of(&self, id: NodeId) -> Option<NodeId> {
        self.nodes[id.0].right
    }

    /// Regenerates the token sequence by an in-order walk. No parentheses are
    /// inserted, so the result is only faithful for trees whose shape already
    /// matches source order, such as chains of equal-precedence operators.
    pub fn to_infix(&self) -> Vec<Token> {
        let mut tokens = Vec::with_capacity(self.nodes.len());
        if let Some(root) = self.root {
            self.push_infix(root, &mut tokens);
        }
        tokens
    }

    fn push_infix(&self, id: NodeId, tokens: &mut Vec<Token>) {
        if let Some(left) = self.left_child_of(id) {
            self.push_infix(left, tokens);
        }
        tokens.push(self.token_of(id).clone());
        if let Some(right) = self.right_child_of(id) {
            self.push_infix(right, tokens);
        }
    }

    fn add_node(&mut self, token: Token) -> NodeId {
        let id = NodeId(self.nodes.len());
        self.nodes.push(ExpressionNode {
            token,
            left: None,
            right: None,
        });
        id
    }

    // One pass over the tokens: each number replaces the pending left
    // operand, and the first operator claims the pending operand and hands
    // the whole remainder to a recursive call. The precedence repair runs as
    // each call returns.
    fn parse_tokens(&mut self, tokens: &[Token]) -> Result<Option<NodeId>, ParseError> {
        let mut pending: Option<NodeId> = None;
        for (position, token) in tokens.iter().enumerate() {
            match token.kind {
                TokenKind::Number => pending = Some(self.add_node(token.clone())),
                TokenKind::Operator => {
                    let left = pending.ok_or_else(|| ParseError::MissingLeftOperand {
                        symbol: token.text.clone(),
                    })?;
                    let right = self.parse_tokens(&tokens[position + 1..])?;
                    let top = self.add_node(token.clone());
                    self.nodes[top.0].left = Some(left);
                    self.nodes[top.0].right = right;
                    return Ok(Some(self.apply_precedence(top)));
                }
                _ => {
                    return Err(ParseError::UnsupportedToken {
                        token: token.clone(),
                    })
                }
            }
        }
        Ok(pending)
    }

    // Repairs precedence at the seam between a freshly built node and its
    // right child. When the top binds at least as tightly as the lifted
    // child (and is not right-associative on a tie), a single left rotation
    // swaps them; the demoted node's right child has then changed, so the
    // same check re-applies to it before it is linked back in. Numbers carry
    // maximal precedence, which terminates the recursion at the leaves.
    fn apply_precedence(&mut self, top: NodeId) -> NodeId {
        let lift = match self.right_child_of(top) {
            Some(id) => id,
            None => return top,
        };
        let top_precedence = operator::precedence(self.token_of(top));
        let lift_precedence = operator::precedence(self.token_of(lift));
        if top_precedence < lift_precedence
            || (top_precedence == lift_precedence
                && operator::is_right_associative(self.token_of(top)))
        {
            return top;
        }
        self.nodes[top.0].right = self.nodes[lift.0].left;
        let demoted = self.apply_precedence(top);
        self.nodes[lift.0].left = Some(demoted);
        lift
    }

    fn subtree_eq(&self, id: NodeId, other: &ExpressionTree, other_id: NodeId) -> bool {
        if self.token_of(id) != other.token_of(other_id) {
            return false;
        }
        let pairs = [
            (self.left_child_of(id), other.left_child_of(other_id)),
            (self.right_child_of(id), other.right_child_of(other_id)),
        ];
        pairs.into_iter().all(|pair| match pair {
            (None, None) => true,
            (Some(a), Some(b)) => self.subtree_eq(a, other, b),
            _ => false,
        })
    }

    // The original tool lists the right operand above the left one; keep
    // that convention in the diagram.
    fn build_diagram(&self, id: NodeId, builder: &mut TreeBuilder) {
        let children = [self.right_child_of(id), self.left_child_of(id)];
        for child in children.into_iter().flatten() {
            let is_leaf =
                self.left_child_of(child).is_none() && self.right_child_of(child).is_none();
            if is_leaf {
                builder.add_empty_child(self.token_of(child).to_string());
            } else {
                builder.begin_child(self.token_of(child).to_string());
                self.build_diagram(child, builder);
                builder.end_child();
            }
        }
    }
}

impl PartialEq for ExpressionTree {
    fn eq(&self, other: &Self) -> bool {
        match (self.root, other.root) {
            (None, None) => true,
            (Some(a), Some(b)) => self.subtree_eq(a, other, b),
            _ => false,
        }
    }
}

impl Eq for ExpressionTree {}

impl Display for ExpressionTree {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let root = match self.root {
            Some(root) => root,
            None => return f.write_str("- empty"),
        };
        let mut builder = TreeBuilder::new(self.token_of(root).to_string());
        self.build_diagram(root, &mut builder);

        let mut buffer: Vec<u8> = Vec::new();
        if write_tree(&builder.build(), &mut buffer).is_err() {
            return Err(fmt::Error);
        }
        match std::str::from_utf8(&buffer) {
            Ok(text) => f.write_str(text),
            Err(_) => Err(fmt::Error),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn build(symbols: &[&str]) -> ExpressionTree {
        let tokens = symbols
            .iter()
            .map(|symbol| {
                if symbol.chars().all(|char| char.is_ascii_digit()) {
                    Token::number(*symbol)
                } else {
                    Token::operator(*symbol)
                }
            })
            .collect();
        ExpressionTree::new(tokens).unwrap()
    }

    fn node_at(tree: &ExpressionTree, path: &str) -> NodeId {
        let mut id = tree.root().expect("tree has no root");
        for step in path.chars() {
            id = match step {
                'L' => tree.left_child_of(id).expect("missing left child"),
                'R' => tree.right_child_of(id).expect("missing right child"),
                _ => panic!("path steps must be L or R"),
            };
        }
        id
    }

    fn text_at<'a>(tree: &'a ExpressionTree, path: &str) -> &'a str {
        tree.token_of(node_at(tree, path)).text.as_str()
    }

    #[test]
    fn basic_addition_builds_flat_tree() {
        let tree = build(&["3", "+", "4"]);

        assert_eq!(text_at(&tree, ""), "+");
        assert_eq!(text_at(&tree, "L"), "3");
        assert_eq!(text_at(&tree, "R"), "4");
    }

    #[test]
    fn same_precedence_chain_left_associates() {
        // 3 + 4 - 5 must group as (3 + 4) - 5
        let tree = build(&["3", "+", "4", "-", "5"]);

        assert_eq!(text_at(&tree, ""), "-");
        assert_eq!(text_at(&tree, "L"), "+");
        assert_eq!(text_at(&tree, "LL"), "3");
        assert_eq!(text_at(&tree, "LR"), "4");
        assert_eq!(text_at(&tree, "R"), "5");
    }

    #[test]
    fn tighter_binding_tail_stays_lifted() {
        // 3 + 4 * 5 must group as 3 + (4 * 5)
        let tree = build(&["3", "+", "4", "*", "5"]);

        assert_eq!(text_at(&tree, ""), "+");
        assert_eq!(text_at(&tree, "L"), "3");
        assert_eq!(text_at(&tree, "R"), "*");
        assert_eq!(text_at(&tree, "RL"), "4");
        assert_eq!(text_at(&tree, "RR"), "5");
    }

    #[test]
    fn tighter_binding_head_rotates_down() {
        // 3 * 4 + 5 must group as (3 * 4) + 5
        let tree = build(&["3", "*", "4", "+", "5"]);

        assert_eq!(text_at(&tree, ""), "+");
        assert_eq!(text_at(&tree, "L"), "*");
        assert_eq!(text_at(&tree, "LL"), "3");
        assert_eq!(text_at(&tree, "LR"), "4");
        assert_eq!(text_at(&tree, "R"), "5");
    }

    #[test]
    fn long_chain_fully_left_associates() {
        // 3 + 4 - 5 + 6 - 7 must group as ((((3 + 4) - 5) + 6) - 7
        let tree = build(&["3", "+", "4", "-", "5", "+", "6", "-", "7"]);

        assert_eq!(text_at(&tree, ""), "-");
        assert_eq!(text_at(&tree, "R"), "7");
        assert_eq!(text_at(&tree, "L"), "+");
        assert_eq!(text_at(&tree, "LR"), "6");
        assert_eq!(text_at(&tree, "LL"), "-");
        assert_eq!(text_at(&tree, "LLR"), "5");
        assert_eq!(text_at(&tree, "LLL"), "+");
        assert_eq!(text_at(&tree, "LLLL"), "3");
        assert_eq!(text_at(&tree, "LLLR"), "4");
    }

    #[test]
    fn bitwise_operators_bind_loosest() {
        // 1 & 2 + 3 keeps the addition lifted; 1 + 2 & 3 rotates it down
        let lifted = build(&["1", "&", "2", "+", "3"]);
        assert_eq!(text_at(&lifted, ""), "&");
        assert_eq!(text_at(&lifted, "R"), "+");

        let rotated = build(&["1", "+", "2", "&", "3"]);
        assert_eq!(text_at(&rotated, ""), "&");
        assert_eq!(text_at(&rotated, "L"), "+");
        assert_eq!(text_at(&rotated, "R"), "3");
    }

    #[test]
    fn single_number_builds_leaf_root() {
        let tree = build(&["42"]);

        let root = tree.root().unwrap();
        assert_eq!(tree.token_of(root), &Token::number("42"));
        assert_eq!(tree.left_child_of(root), None);
        assert_eq!(tree.right_child_of(root), None);
    }

    #[test]
    fn empty_token_list_builds_empty_tree() {
        let tree = ExpressionTree::new(Vec::new()).unwrap();

        assert!(tree.is_empty());
        assert_eq!(tree.to_infix(), Vec::new());
    }

    #[test]
    fn latest_number_before_operator_becomes_left_operand() {
        // adjacent numbers: the most recent one wins the operand slot
        let tree = build(&["3", "4", "+", "5"]);

        assert_eq!(text_at(&tree, ""), "+");
        assert_eq!(text_at(&tree, "L"), "4");
        assert_eq!(text_at(&tree, "R"), "5");
    }

    #[test]
    fn trailing_operator_keeps_missing_right_child() {
        let tree = build(&["3", "+"]);

        let root = tree.root().unwrap();
        assert_eq!(tree.token_of(root), &Token::operator("+"));
        assert_eq!(
            tree.left_child_of(root).map(|id| tree.token_of(id).clone()),
            Some(Token::number("3"))
        );
        assert_eq!(tree.right_child_of(root), None);
    }

    #[test]
    fn leading_operator_reports_missing_left_operand() {
        let error = ExpressionTree::new(vec![Token::operator("+"), Token::number("3")])
            .unwrap_err();

        assert_eq!(
            error,
            ParseError::MissingLeftOperand {
                symbol: "+".to_string()
            }
        );
    }

    #[test]
    fn parenthesis_token_reports_unsupported() {
        let tokens = vec![
            Token::number("1"),
            Token::operator("+"),
            Token::left_paren(),
            Token::number("2"),
            Token::right_paren(),
        ];

        let error = ExpressionTree::new(tokens).unwrap_err();

        assert_eq!(
            error,
            ParseError::UnsupportedToken {
                token: Token::left_paren()
            }
        );
    }

    #[test]
    fn structural_equality_ignores_arena_layout() {
        let built = build(&["3", "*", "4", "+", "5"]);
        let same_shape = build(&["3", "*", "4", "+", "5"]);
        let different = build(&["3", "+", "4", "*", "5"]);

        assert_eq!(built, same_shape);
        assert_ne!(built, different);
    }

    #[test]
    fn infix_regeneration_preserves_source_order() {
        let tree = build(&["3", "+", "4", "-", "5"]);

        assert_eq!(
            tree.to_infix(),
            vec![
                Token::number("3"),
                Token::operator("+"),
                Token::number("4"),
                Token::operator("-"),
                Token::number("5"),
            ]
        );
    }

    #[test]
    fn rebuilding_from_regenerated_tokens_reproduces_the_tree() {
        let tree = build(&["3", "+", "4", "-", "5", "+", "6", "-", "7"]);

        let rebuilt = ExpressionTree::new(tree.to_infix()).unwrap();

        assert_eq!(rebuilt, tree);
    }

    #[test]
    fn diagram_lists_right_child_before_left() {
        let tree = build(&["2", "+", "3"]);

        let diagram = format!("{}", tree);

        let right = diagram.find("\"3\"").expect("right operand not rendered");
        let left = diagram.find("\"2\"").expect("left operand not rendered");
        assert!(right < left, "right child must be listed first:\n{}", diagram);
    }

    #[test]
    fn empty_tree_renders() {
        let tree = ExpressionTree::new(Vec::new()).unwrap();

        assert_eq!(format!("{}", tree), "- empty");
    }

    #[test]
    fn print_succeeds() {
        let tree = build(&["3", "+", "4", "*", "5"]);

        print!("{}", tree);
    }
}
