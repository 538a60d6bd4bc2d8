//! Tree snapshot - textual dump of the mounted element tree.
//!
//! One line per allocated element, depth-first from the roots, indented two
//! spaces per level. Hidden elements carry `style="display: none"`, which is
//! exactly what a kept-but-inactive wrapper looks like. A `style` attribute is
//! folded into that single `style` entry, visibility last.
//!
//! ```text
//! <div key="a" class="panel" style="display: none">
//!   <text>
//! <div key="b" class="panel">
//!   <text>
//! ```

use super::arrays::{core, element};
use super::registry::{get_allocated_indices, get_children};
use crate::render::split_style_attr;
use crate::types::Style;

/// Dump every allocated element as indented lines.
pub fn snapshot() -> String {
    let mut out = String::new();
    let roots = get_allocated_indices()
        .into_iter()
        .filter(|&index| core::get_parent_index(index).is_none());
    for root in roots {
        write_element(&mut out, root, 0);
    }
    out
}

fn write_element(out: &mut String, index: usize, depth: usize) {
    out.push_str(&" ".repeat(depth * 2));
    out.push('<');
    out.push_str(&element::get_tag(index));
    if let Some(key) = core::get_key(index) {
        out.push_str(&format!(" key=\"{}\"", key));
    }

    let (attrs, base) = split_style_attr(&element::get_attrs(index));
    for (name, value) in attrs.iter() {
        out.push_str(&format!(" {}={}", name, value));
    }
    let style = Style {
        hidden: !core::is_visible(index),
        base,
    };
    if !style.is_empty() {
        out.push_str(&format!(" style=\"{}\"", style));
    }
    out.push_str(">\n");

    for child in get_children(index) {
        write_element(out, child, depth + 1);
    }
}
