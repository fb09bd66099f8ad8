//! Tree and code table rendering

use std::fs;
use std::io::Write;
use std::path::Path;
use thiserror::Error;

use crate::symbol::Weight;
use crate::table::SymbolTable;
use crate::tree::{CodeTable, HuffmanTree, Node};

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Write rendered text to a file, creating parent directories
pub fn write_rendered(content: &str, output_path: &Path) -> Result<(), OutputError> {
    if let Some(parent) = output_path.parent() {
        fs::create_dir_all(parent)?;
    }

    let mut file = fs::File::create(output_path)?;
    file.write_all(content.as_bytes())?;

    Ok(())
}

/// Render a tree as an outline, left (`0`) child first
pub fn render_tree(tree: &HuffmanTree) -> String {
    let mut output = String::new();
    let root = tree.root();

    // a lone leaf still gets the code `0`
    let root_code = if root.is_leaf() { "0" } else { "" };
    output.push_str(&node_label(root, root_code));
    output.push('\n');

    if let Node::Internal { left, right, .. } = root {
        let mut code = String::new();
        render_child(left, &mut output, "", false, &mut code, '0');
        render_child(right, &mut output, "", true, &mut code, '1');
    }

    output
}

fn render_child(
    node: &Node,
    output: &mut String,
    prefix: &str,
    is_last: bool,
    code: &mut String,
    bit: char,
) {
    code.push(bit);

    let connector = if is_last { "└── " } else { "├── " };
    output.push_str(prefix);
    output.push_str(connector);
    output.push_str(&node_label(node, code));
    output.push('\n');

    if let Node::Internal { left, right, .. } = node {
        let child_prefix = format!("{}{}", prefix, if is_last { "    " } else { "│   " });
        render_child(left, output, &child_prefix, false, code, '0');
        render_child(right, output, &child_prefix, true, code, '1');
    }

    code.pop();
}

fn node_label(node: &Node, code: &str) -> String {
    match node {
        Node::Leaf { symbol, weight } => {
            format!("{} ({}) = {}", symbol, format_weight(*weight), code)
        }
        Node::Internal { weight, .. } => format!("({})", format_weight(*weight)),
    }
}

/// Render `<symbol>\t<weight>\t<code>` lines followed by the expected length
pub fn render_code_table(codes: &CodeTable, table: &SymbolTable) -> String {
    let mut output = String::new();

    for (symbol, code) in codes.iter() {
        let weight = table.weight(symbol).unwrap_or(0.0);
        output.push_str(&format!("{}\t{}\t{}\n", symbol, format_weight(weight), code));
    }

    output.push_str(&format!(
        "expected length: {} bits/symbol\n",
        format_weight(codes.weighted_length(table))
    ));

    output
}

/// Up to six decimals without trailing zeros; scientific below 1e-4
fn format_weight(weight: Weight) -> String {
    if weight != 0.0 && weight.abs() < 1e-4 {
        return format!("{:e}", weight);
    }

    let fixed = format!("{:.6}", weight);
    fixed
        .trim_end_matches('0')
        .trim_end_matches('.')
        .to_string()
}
