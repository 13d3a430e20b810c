//! Configuration options for subtree printing.

/// Controls how [`Directory::print_subtree_with`](crate::Directory::print_subtree_with)
/// lays out each line.
///
/// The default produces `<level spaces>/<name>\n` for every node.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PrintOptions {
    /// Character repeated for indentation.
    pub indent: char,
    /// Number of indent characters per depth level.
    pub indent_width: usize,
    /// Character written before each node name.
    pub separator: char,
    /// Line terminator written after each node name.
    pub line_ending: String,
}

impl Default for PrintOptions {
    fn default() -> Self {
        Self {
            indent: ' ',
            indent_width: 1,
            separator: '/',
            line_ending: "\n".to_string(),
        }
    }
}

impl PrintOptions {
    /// Set the indentation character.
    ///
    /// # Arguments
    /// * `indent` - Character repeated per level
    pub fn with_indent(mut self, indent: char) -> Self {
        self.indent = indent;
        self
    }

    /// Set the number of indent characters per level.
    ///
    /// # Arguments
    /// * `width` - Characters per depth level
    pub fn with_indent_width(mut self, width: usize) -> Self {
        self.indent_width = width;
        self
    }

    /// Set the separator written before each name.
    ///
    /// # Arguments
    /// * `separator` - Separator character
    pub fn with_separator(mut self, separator: char) -> Self {
        self.separator = separator;
        self
    }

    /// Set the line terminator.
    ///
    /// # Arguments
    /// * `line_ending` - Terminator appended after each name
    pub fn with_line_ending(mut self, line_ending: impl Into<String>) -> Self {
        self.line_ending = line_ending.into();
        self
    }

    /// Build the prefix for a node at the given depth.
    ///
    /// # Arguments
    /// * `level` - Depth of the node, 0 for the subtree root
    ///
    /// # Returns
    /// Indentation followed by the separator.
    pub fn prefix(&self, level: usize) -> String {
        let mut prefix: String = std::iter::repeat(self.indent)
            .take(level * self.indent_width)
            .collect();
        prefix.push(self.separator);
        prefix
    }
}
