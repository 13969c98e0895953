use clap::{Args, Subcommand, ValueEnum};
use cjk_core::models::{ContentKind, ContentTarget};

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Sign in and persist the credential pair. The password is read from
    /// CJK_PASSWORD, or from standard input when that is unset
    Login {
        #[arg(short, long)]
        username: String,
    },
    /// Forget the stored credentials
    Logout,
    /// Show the signed-in member
    Whoami,
    /// Create a member account
    Register(RegisterArgs),
    /// List blog posts
    Blog {
        #[arg(long)]
        category: Option<String>,
        #[arg(long)]
        published: Option<bool>,
    },
    /// List news
    News {
        #[arg(long)]
        published: Option<bool>,
    },
    /// List activities
    Activities {
        #[arg(long = "type")]
        activity_type: Option<String>,
        #[arg(long)]
        published: Option<bool>,
    },
    /// List gallery entries
    Gallery,
    /// Like or unlike a content object
    Like(TargetArgs),
    /// List the comments on a content object
    Comments(TargetArgs),
    /// Comment on a content object as the signed-in member
    Comment {
        #[command(flatten)]
        target: TargetArgs,
        #[arg(long)]
        text: String,
    },
    /// Publish or unpublish content (staff only)
    Publish {
        #[arg(value_enum)]
        kind: KindArg,
        id: i64,
        /// Unpublish instead
        #[arg(long)]
        hide: bool,
    },
}

/// Registration fields. The password is read like `login` reads it.
#[derive(Debug, Args)]
pub struct RegisterArgs {
    #[arg(long)]
    pub username: String,
    #[arg(long)]
    pub email: String,
    #[arg(long, default_value = "")]
    pub first_name: String,
    #[arg(long, default_value = "")]
    pub last_name: String,
    #[arg(long, default_value = "")]
    pub phone: String,
    #[arg(long, default_value = "")]
    pub quartier: String,
    /// YYYY-MM-DD
    #[arg(long, default_value = "")]
    pub date_naissance: String,
}

/// A content object addressed by numeric content type or by label.
#[derive(Debug, Args)]
pub struct TargetArgs {
    /// Numeric content type id, or a label such as `blogpost`
    #[arg(long)]
    pub content_type: String,
    #[arg(long)]
    pub object_id: i64,
}

impl TargetArgs {
    pub fn target(&self) -> ContentTarget {
        match self.content_type.parse::<i64>() {
            Ok(content_type) => ContentTarget::TypeId {
                content_type,
                object_id: self.object_id,
            },
            Err(_) => ContentTarget::TypeLabel {
                content_type: self.content_type.clone(),
                object_id: self.object_id,
            },
        }
    }
}

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum KindArg {
    Blog,
    News,
    Activity,
}

impl From<KindArg> for ContentKind {
    fn from(kind: KindArg) -> Self {
        match kind {
            KindArg::Blog => ContentKind::BlogPost,
            KindArg::News => ContentKind::News,
            KindArg::Activity => ContentKind::Activity,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_content_type_is_an_id() {
        let args = TargetArgs {
            content_type: "14".into(),
            object_id: 3,
        };
        assert_eq!(
            args.target(),
            ContentTarget::TypeId {
                content_type: 14,
                object_id: 3
            }
        );

        let args = TargetArgs {
            content_type: "activity".into(),
            object_id: 3,
        };
        assert!(matches!(args.target(), ContentTarget::TypeLabel { .. }));
    }
}
