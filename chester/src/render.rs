use atty::Stream;
use lookup::TreeNode;
use termimad::{terminal_size, FmtText, MadSkin};

/// Renders a markdown body to the terminal, falling back to the raw text
/// when stdout is not a tty.
pub fn markdown(body: &str) {
    if atty::is(Stream::Stdout) {
        let skin = MadSkin::default();
        let formatted = FmtText::from(&skin, body, Some(markdown_width()));
        println!("{formatted}");
    } else {
        println!("{body}");
    }
}

fn markdown_width() -> usize {
    let (width, _) = terminal_size();
    width.max(60) as usize
}

/// Prints the definition hierarchy with two-space indentation per level.
pub fn tree(nodes: &[TreeNode]) {
    for node in nodes {
        tree_node(node, 0);
    }
}

fn tree_node(node: &TreeNode, depth: usize) {
    let indent = "  ".repeat(depth);
    println!("{indent}{}", node.label);
    for child in &node.children {
        tree_node(child, depth + 1);
    }
}
