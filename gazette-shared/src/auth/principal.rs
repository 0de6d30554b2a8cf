/// Principals and capabilities
///
/// Every request resolves to exactly one principal: `Anonymous` when no
/// valid credentials were presented, `Authenticated(username)` otherwise.
/// Handlers declare the capability they require and call [`authorize`]
/// before touching the store.
///
/// Capabilities form a small fixed ladder:
///
/// - `View`: granted to everyone, anonymous included (open registration is
///   a deliberate policy of this API, not an oversight)
/// - `Authenticated`: granted to any authenticated principal
/// - `Owner`: computed per request by comparing the principal's username to
///   the loaded resource's owner; never a static grant
///
/// # Example
///
/// ```
/// use gazette_shared::auth::{authorize, Capability, Principal};
///
/// let alice = Principal::Authenticated("alice".to_string());
///
/// assert!(authorize(&alice, Capability::View, None).is_ok());
/// assert!(authorize(&alice, Capability::Owner, Some("alice")).is_ok());
/// assert!(authorize(&alice, Capability::Owner, Some("bob")).is_err());
/// ```

use serde::{Deserialize, Serialize};

/// The identity associated with a request after the credential check
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum Principal {
    /// No valid credentials presented
    Anonymous,

    /// Valid credentials for this username
    Authenticated(String),
}

impl Principal {
    /// The authenticated username, if any
    pub fn username(&self) -> Option<&str> {
        match self {
            Principal::Anonymous => None,
            Principal::Authenticated(username) => Some(username),
        }
    }

    /// The full principal list for introspection (`/whoami`).
    ///
    /// Anonymous requests carry only `everyone`; authenticated requests add
    /// `authenticated` and the username itself.
    pub fn effective_principals(&self) -> Vec<String> {
        match self {
            Principal::Anonymous => vec!["everyone".to_string()],
            Principal::Authenticated(username) => vec![
                "everyone".to_string(),
                "authenticated".to_string(),
                username.clone(),
            ],
        }
    }
}

/// A named permission checked before a handler runs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Read access, granted to everyone
    View,

    /// Requires a valid login
    Authenticated,

    /// Requires a valid login matching the resource owner
    Owner,
}

/// Access denial, translated by handlers into HTTP 403
#[derive(Debug, Clone, thiserror::Error)]
pub enum Forbidden {
    /// The capability requires authentication and the principal is anonymous
    #[error("Authentication required")]
    AuthenticationRequired,

    /// The principal is authenticated but is not the resource owner
    #[error("Must authenticate as resource owner")]
    NotOwner,
}

/// Checks whether `principal` holds `capability`.
///
/// `owner` is the loaded resource's owning username and is only consulted
/// for `Capability::Owner`; pass `None` when the check is not
/// resource-scoped.
pub fn authorize(
    principal: &Principal,
    capability: Capability,
    owner: Option<&str>,
) -> Result<(), Forbidden> {
    match capability {
        Capability::View => Ok(()),
        Capability::Authenticated => match principal {
            Principal::Authenticated(_) => Ok(()),
            Principal::Anonymous => Err(Forbidden::AuthenticationRequired),
        },
        Capability::Owner => match principal {
            Principal::Anonymous => Err(Forbidden::AuthenticationRequired),
            Principal::Authenticated(username) => {
                if owner == Some(username.as_str()) {
                    Ok(())
                } else {
                    Err(Forbidden::NotOwner)
                }
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn alice() -> Principal {
        Principal::Authenticated("alice".to_string())
    }

    #[test]
    fn test_view_granted_to_everyone() {
        assert!(authorize(&Principal::Anonymous, Capability::View, None).is_ok());
        assert!(authorize(&alice(), Capability::View, None).is_ok());
    }

    #[test]
    fn test_authenticated_denied_to_anonymous() {
        let result = authorize(&Principal::Anonymous, Capability::Authenticated, None);
        assert!(matches!(result, Err(Forbidden::AuthenticationRequired)));

        assert!(authorize(&alice(), Capability::Authenticated, None).is_ok());
    }

    #[test]
    fn test_owner_requires_matching_username() {
        assert!(authorize(&alice(), Capability::Owner, Some("alice")).is_ok());

        let result = authorize(&alice(), Capability::Owner, Some("bob"));
        assert!(matches!(result, Err(Forbidden::NotOwner)));
    }

    #[test]
    fn test_owner_denied_to_anonymous() {
        let result = authorize(&Principal::Anonymous, Capability::Owner, Some("alice"));
        assert!(matches!(result, Err(Forbidden::AuthenticationRequired)));
    }

    #[test]
    fn test_owner_denied_without_resource_owner() {
        // A resource with no owner recorded can never pass the owner check.
        let result = authorize(&alice(), Capability::Owner, None);
        assert!(matches!(result, Err(Forbidden::NotOwner)));
    }

    #[test]
    fn test_effective_principals() {
        assert_eq!(Principal::Anonymous.effective_principals(), vec!["everyone"]);
        assert_eq!(
            alice().effective_principals(),
            vec!["everyone", "authenticated", "alice"]
        );
    }

    #[test]
    fn test_username() {
        assert_eq!(Principal::Anonymous.username(), None);
        assert_eq!(alice().username(), Some("alice"));
    }
}
