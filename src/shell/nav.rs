use crate::domain::User;

/// One header link.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NavItem {
    pub label: &'static str,
    pub path: &'static str,
    pub active: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthAction {
    SignIn,
    SignOut { email: String },
}

/// Header view model.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Header {
    pub nav: Vec<NavItem>,
    pub auth_action: AuthAction,
}

const PUBLIC_LINKS: [(&str, &str); 3] = [
    ("Browse Celebrities", "/browse"),
    ("Categories", "/categories"),
    ("How It Works", "/how-it-works"),
];

impl Header {
    /// `current_path` is matched exactly, without the query string.
    pub fn build(current_path: &str, user: Option<&User>) -> Self {
        let mut nav: Vec<NavItem> = PUBLIC_LINKS
            .iter()
            .map(|&(label, path)| NavItem {
                label,
                path,
                active: current_path == path,
            })
            .collect();

        let auth_action = match user {
            Some(user) => {
                nav.push(NavItem {
                    label: "My Orders",
                    path: "/dashboard",
                    active: current_path == "/dashboard",
                });
                AuthAction::SignOut {
                    email: user.email.clone(),
                }
            }
            None => AuthAction::SignIn,
        };

        Self { nav, auth_action }
    }

    pub fn shows(&self, label: &str) -> bool {
        self.nav.iter().any(|item| item.label == label)
    }
}
