//! Studio command registry: the single source of truth for shell commands.
//!
//! The completer, help screen and input defaults all derive from this table.

#[derive(Debug, Clone)]
pub struct CommandEntry {
    /// The command word as typed
    pub name: &'static str,
    /// Argument synopsis shown in help
    pub usage: &'static str,
    pub description: &'static str,
    pub category: CommandCategory,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CommandCategory {
    Navigation,
    Design,
    Generation,
    Library,
    General,
}

impl CommandCategory {
    pub fn label(self) -> &'static str {
        match self {
            CommandCategory::Navigation => "Navigation",
            CommandCategory::Design => "Design",
            CommandCategory::Generation => "Generation",
            CommandCategory::Library => "Library",
            CommandCategory::General => "General",
        }
    }

    pub const ALL: [CommandCategory; 5] = [
        CommandCategory::Navigation,
        CommandCategory::Design,
        CommandCategory::Generation,
        CommandCategory::Library,
        CommandCategory::General,
    ];
}

pub static COMMANDS: &[CommandEntry] = &[
    // Navigation
    CommandEntry {
        name: "home",
        usage: "",
        description: "Show the style gallery",
        category: CommandCategory::Navigation,
    },
    CommandEntry {
        name: "template",
        usage: "<style>",
        description: "Start a new design from a gallery style",
        category: CommandCategory::Navigation,
    },
    CommandEntry {
        name: "show",
        usage: "",
        description: "Show the workspace",
        category: CommandCategory::Navigation,
    },
    // Design
    CommandEntry {
        name: "set",
        usage: "<field> <value>",
        description: "Set style, bedrooms, bathrooms, levels or lot-size",
        category: CommandCategory::Design,
    },
    CommandEntry {
        name: "feature",
        usage: "<name>",
        description: "Toggle an optional feature",
        category: CommandCategory::Design,
    },
    CommandEntry {
        name: "notes",
        usage: "<text|clear>",
        description: "Set or clear custom instructions",
        category: CommandCategory::Design,
    },
    // Generation
    CommandEntry {
        name: "generate",
        usage: "[blueprint|exterior|both]",
        description: "Generate renderings for the workspace",
        category: CommandCategory::Generation,
    },
    CommandEntry {
        name: "download",
        usage: "<blueprint|exterior|both> [id]",
        description: "Save workspace or library renderings to the download directory",
        category: CommandCategory::Generation,
    },
    // Library
    CommandEntry {
        name: "save",
        usage: "",
        description: "Save the workspace to the library",
        category: CommandCategory::Library,
    },
    CommandEntry {
        name: "library",
        usage: "",
        description: "List saved designs",
        category: CommandCategory::Library,
    },
    CommandEntry {
        name: "edit",
        usage: "<id>",
        description: "Reopen a saved design",
        category: CommandCategory::Library,
    },
    CommandEntry {
        name: "delete",
        usage: "<id>",
        description: "Delete a saved design",
        category: CommandCategory::Library,
    },
    CommandEntry {
        name: "compare",
        usage: "",
        description: "Compare saved designs side by side",
        category: CommandCategory::Library,
    },
    // General
    CommandEntry {
        name: "help",
        usage: "",
        description: "Show available commands",
        category: CommandCategory::General,
    },
];

pub static EXIT_COMMANDS: &[&str] = &["exit", "quit"];

/// Fields accepted by `set`.
pub static SET_FIELDS: &[&str] = &["style", "bedrooms", "bathrooms", "levels", "lot-size"];

pub fn command_names() -> Vec<String> {
    let mut names: Vec<String> = COMMANDS.iter().map(|c| c.name.to_string()).collect();
    names.extend(EXIT_COMMANDS.iter().map(|s| s.to_string()));
    names
}

pub fn command_description(name: &str) -> Option<&'static str> {
    COMMANDS
        .iter()
        .find(|c| c.name == name)
        .map(|c| c.description)
        .or_else(|| EXIT_COMMANDS.contains(&name).then_some("Leave the studio"))
}

pub fn is_known_command(input: &str) -> bool {
    let word = input.split_whitespace().next().unwrap_or("");
    COMMANDS.iter().any(|c| c.name == word) || EXIT_COMMANDS.contains(&word)
}
