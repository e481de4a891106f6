//! Unified diff parsing into per-file change records.
//!
//! The parser is total over all string inputs: diffs come from an external
//! tool, so malformed or truncated text degrades to partial records instead
//! of an error. Only three line shapes are structurally significant:
//!
//! - `diff --git ` starts a new file section and flushes the previous one.
//! - `+++ b/<path>` names the post-change file; the section is materialized
//!   only when the path matches the configured extension filter.
//! - `+<text>` (a single marker, not the `+++` header) is an added line.
//!
//! Context lines are folded into the reconstructed post-change content so
//! file-scoped checks see best-effort "file after patch" text, not just the
//! additions. Removed lines are retained for change statistics only.

/// One logical file touched by a diff.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileChange {
    /// Post-change file path, as named by the `+++ b/` header.
    pub path: String,
    /// Lines introduced by this change, in file order, markers stripped.
    pub added_lines: Vec<String>,
    /// Lines removed by this change; never consulted by checks.
    pub removed_lines: Vec<String>,
    /// Reconstructed post-change file content (context + added lines).
    pub full_content: String,
}

/// In-progress file section; converted to a [`FileChange`] on flush.
#[derive(Debug)]
struct Accumulator {
    path: String,
    added: Vec<String>,
    removed: Vec<String>,
    content: Vec<String>,
}

impl Accumulator {
    fn new(path: &str) -> Self {
        Self {
            path: path.to_string(),
            added: Vec::new(),
            removed: Vec::new(),
            content: Vec::new(),
        }
    }

    fn finish(self) -> FileChange {
        FileChange {
            path: self.path,
            added_lines: self.added,
            removed_lines: self.removed,
            full_content: self.content.join("\n"),
        }
    }
}

/// Parses unified diff text into per-file change records.
///
/// Returns one [`FileChange`] per file section whose post-change path ends
/// with `target_extension`, in order of first appearance. Sections for
/// deleted files (`+++ /dev/null`), binary files, and non-matching paths are
/// scanned but not materialized. Never fails: empty or malformed input
/// yields an empty or partial result.
#[must_use]
pub fn parse_diff(diff_text: &str, target_extension: &str) -> Vec<FileChange> {
    let mut files: Vec<FileChange> = Vec::new();
    let mut current: Option<Accumulator> = None;

    for line in diff_text.lines() {
        if line.starts_with("diff --git ") {
            if let Some(acc) = current.take() {
                files.push(acc.finish());
            }
        } else if let Some(path) = line.strip_prefix("+++ b/") {
            current = if path != "/dev/null" && path.ends_with(target_extension) {
                Some(Accumulator::new(path))
            } else {
                None
            };
        } else if line.starts_with("--- ") || line.starts_with("@@ ") || line.starts_with("index ")
        {
            // File headers and hunk headers carry no content.
        } else if let Some(acc) = current.as_mut() {
            if let Some(added) = line.strip_prefix('+') {
                // A second '+' would make this a header line, not an addition.
                if !added.starts_with('+') {
                    acc.added.push(added.to_string());
                    acc.content.push(added.to_string());
                }
            } else if let Some(removed) = line.strip_prefix('-') {
                acc.removed.push(removed.to_string());
            } else if line.starts_with('\\') {
                // "\ No newline at end of file"
            } else {
                let context = line.strip_prefix(' ').unwrap_or(line);
                acc.content.push(context.to_string());
            }
        }
    }

    if let Some(acc) = current.take() {
        files.push(acc.finish());
    }

    tracing::debug!(
        files = files.len(),
        "parsed diff into matching file sections"
    );
    files
}

#[cfg(test)]
mod tests {
    use super::*;

    const SIMPLE_ADDITION: &str = "\
diff --git a/models/orders.sql b/models/orders.sql
index 0000000..1111111 100644
--- /dev/null
+++ b/models/orders.sql
@@ -0,0 +1,3 @@
+select
+    order_id,
+    amount
";

    #[test]
    fn pure_addition_round_trips_added_lines() {
        let changes = parse_diff(SIMPLE_ADDITION, ".sql");
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].path, "models/orders.sql");
        assert_eq!(
            changes[0].added_lines,
            vec!["select", "    order_id", "    amount"]
        );
        assert_eq!(changes[0].full_content, "select\n    order_id\n    amount");
    }

    #[test]
    fn empty_input_yields_empty_sequence() {
        assert!(parse_diff("", ".sql").is_empty());
    }

    #[test]
    fn extension_filter_drops_non_matching_files() {
        let diff = "\
diff --git a/README.md b/README.md
--- a/README.md
+++ b/README.md
@@ -1 +1,2 @@
 # title
+select * from prod.users
";
        assert!(parse_diff(diff, ".sql").is_empty());
    }

    #[test]
    fn deleted_file_section_is_skipped() {
        let diff = "\
diff --git a/models/old.sql b/models/old.sql
--- a/models/old.sql
+++ /dev/null
@@ -1,2 +0,0 @@
-select 1
-from t
";
        assert!(parse_diff(diff, ".sql").is_empty());
    }

    #[test]
    fn context_lines_are_part_of_full_content_but_not_added_lines() {
        let diff = "\
diff --git a/models/orders.sql b/models/orders.sql
--- a/models/orders.sql
+++ b/models/orders.sql
@@ -1,3 +1,4 @@
 select
     order_id,
+    amount,
     created_at
";
        let changes = parse_diff(diff, ".sql");
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].added_lines, vec!["    amount,"]);
        assert_eq!(
            changes[0].full_content,
            "select\n    order_id,\n    amount,\n    created_at"
        );
    }

    #[test]
    fn removed_lines_are_retained_but_excluded_from_content() {
        let diff = "\
diff --git a/models/orders.sql b/models/orders.sql
--- a/models/orders.sql
+++ b/models/orders.sql
@@ -1,2 +1,2 @@
-select *
+select order_id
 from orders
";
        let changes = parse_diff(diff, ".sql");
        assert_eq!(changes[0].removed_lines, vec!["select *"]);
        assert_eq!(changes[0].full_content, "select order_id\nfrom orders");
    }

    #[test]
    fn multiple_files_keep_first_appearance_order() {
        let diff = "\
diff --git a/models/b.sql b/models/b.sql
+++ b/models/b.sql
@@ -0,0 +1 @@
+select 2
diff --git a/models/a.sql b/models/a.sql
+++ b/models/a.sql
@@ -0,0 +1 @@
+select 1
";
        let changes = parse_diff(diff, ".sql");
        let paths: Vec<&str> = changes.iter().map(|c| c.path.as_str()).collect();
        assert_eq!(paths, vec!["models/b.sql", "models/a.sql"]);
    }

    #[test]
    fn multiple_hunks_accumulate_into_one_record() {
        let diff = "\
diff --git a/models/a.sql b/models/a.sql
--- a/models/a.sql
+++ b/models/a.sql
@@ -1,2 +1,3 @@
 select id
+    , amount
 from orders
@@ -10,1 +11,2 @@
 where amount > 0
+  and id is not null
";
        let changes = parse_diff(diff, ".sql");
        assert_eq!(changes.len(), 1);
        assert_eq!(
            changes[0].added_lines,
            vec!["    , amount", "  and id is not null"]
        );
    }

    #[test]
    fn final_unflushed_section_is_appended() {
        // Truncated diff: no trailing newline, no following section.
        let diff = "diff --git a/m.sql b/m.sql\n+++ b/m.sql\n@@ -0,0 +1 @@\n+select 1";
        let changes = parse_diff(diff, ".sql");
        assert_eq!(changes.len(), 1);
        assert_eq!(changes[0].added_lines, vec!["select 1"]);
    }

    #[test]
    fn added_lines_are_a_subsequence_of_full_content() {
        let diff = "\
diff --git a/models/a.sql b/models/a.sql
+++ b/models/a.sql
@@ -1,3 +1,5 @@
 with base as (
+    select *
     from t
 )
+select 1
";
        let changes = parse_diff(diff, ".sql");
        let content_lines: Vec<&str> = changes[0].full_content.lines().collect();
        let mut cursor = 0;
        for added in &changes[0].added_lines {
            let pos = content_lines[cursor..]
                .iter()
                .position(|l| l == added)
                .expect("added line present in content");
            cursor += pos + 1;
        }
    }

    #[test]
    fn garbage_input_never_panics() {
        let garbage = "+++ b/\n+++\ndiff --git\n+\n-\n\\ nope\n@@@\nrandom";
        let _ = parse_diff(garbage, ".sql");
    }

    #[test]
    fn no_newline_marker_is_ignored() {
        let diff = "\
diff --git a/m.sql b/m.sql
+++ b/m.sql
@@ -0,0 +1 @@
+select 1
\\ No newline at end of file
";
        let changes = parse_diff(diff, ".sql");
        assert_eq!(changes[0].added_lines, vec!["select 1"]);
        assert_eq!(changes[0].full_content, "select 1");
    }
}
