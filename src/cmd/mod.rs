pub mod add;
pub mod delete;
pub mod generate;
pub mod get;
pub mod list;
pub mod show;
pub mod validate;

pub enum CommandType {
    Show,
    Get,
    List,
    Add,
    Delete,
    Generate,
    Validate,
}

impl CommandType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CommandType::Show => "show",
            CommandType::Get => "get",
            CommandType::List => "list",
            CommandType::Add => "add",
            CommandType::Delete => "delete",
            CommandType::Generate => "generate",
            CommandType::Validate => "validate",
        }
    }

    pub fn from_name(name: &str) -> Option<CommandType> {
        [
            CommandType::Show,
            CommandType::Get,
            CommandType::List,
            CommandType::Add,
            CommandType::Delete,
            CommandType::Generate,
            CommandType::Validate,
        ]
        .into_iter()
        .find(|command| command.as_str() == name)
    }

    /// Whether the command reads secrets, i.e. needs the registry loaded.
    pub fn needs_registry(&self) -> bool {
        matches!(
            self,
            CommandType::Show | CommandType::Get | CommandType::List | CommandType::Validate
        )
    }
}
