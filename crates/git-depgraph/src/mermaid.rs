use git_revwalk::DependencyGraph;

/// Serialize a dependency graph as a top-down Mermaid flowchart.
///
/// Each (file, commit) pair becomes one `file --> commit` edge line, in
/// graph order. Double quotes in labels are backslash-escaped.
pub fn generate(graph: &DependencyGraph) -> String {
    let mut lines = vec!["graph TD".to_string()];
    for (file, commits) in graph.iter() {
        let node = escape(file);
        for commit in commits {
            lines.push(format!("    {node} --> {}", escape(&commit.to_hex())));
        }
    }
    lines.join("\n")
}

fn escape(label: &str) -> String {
    label.replace('"', "\\\"")
}
