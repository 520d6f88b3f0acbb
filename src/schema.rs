//! Structural validation of untyped JSON into [`User`] and [`Post`] records.
//!
//! Every fetch path routes its decoded payload through this module before the
//! data reaches application state. Validation is pure and aggregating: all
//! violations are collected in document order, each qualified by its JSON path
//! (for example `[3].address.geo.lat`), so the result is deterministic.

use crate::model::{Address, Company, Geo, Post, User};
use once_cell::sync::Lazy;
use regex::Regex;
use serde_json::{Map, Value};
use std::fmt;

static EMAIL_RE: Lazy<Option<Regex>> = Lazy::new(|| Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").ok());

/// Returns true if `email` looks like `local@domain.tld`.
pub fn valid_email(email: &str) -> bool {
    EMAIL_RE.as_ref().is_some_and(|re| re.is_match(email))
}

/// A single structural problem found while validating a payload.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum Violation {
    MissingField { path: String },
    WrongType { path: String, expected: &'static str },
    InvalidFormat { path: String, format: &'static str },
}

impl Violation {
    #[must_use]
    pub fn path(&self) -> &str {
        match self {
            Self::MissingField { path }
            | Self::WrongType { path, .. }
            | Self::InvalidFormat { path, .. } => path,
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let shown = |path: &str| if path.is_empty() { "(root)".to_string() } else { path.to_string() };
        match self {
            Self::MissingField { path } => write!(f, "{}: missing field", shown(path)),
            Self::WrongType { path, expected } => write!(f, "{}: expected {expected}", shown(path)),
            Self::InvalidFormat { path, format } => write!(f, "{}: invalid {format}", shown(path)),
        }
    }
}

/// All violations found in one payload, never empty.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidationError {
    violations: Vec<Violation>,
}

impl ValidationError {
    #[must_use]
    pub fn violations(&self) -> &[Violation] {
        &self.violations
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        for violation in &self.violations {
            if !first {
                f.write_str("; ")?;
            }
            write!(f, "{violation}")?;
            first = false;
        }
        Ok(())
    }
}

impl std::error::Error for ValidationError {}

/// Validates a single user object.
///
/// # Errors
/// Returns every violation found in the object.
pub fn validate_user(value: &Value) -> Result<User, ValidationError> {
    let mut checker = Checker::default();
    let user = checker.user(value, "");
    checker.finish(user)
}

/// Validates an array of user objects, preserving order.
///
/// # Errors
/// Returns every violation found across all elements.
pub fn validate_users(value: &Value) -> Result<Vec<User>, ValidationError> {
    let mut checker = Checker::default();
    let users = checker.array(value, "", Checker::user);
    checker.finish(users)
}

/// Validates a single normalized post object (`{id, title, body, userId}`).
///
/// # Errors
/// Returns every violation found in the object.
pub fn validate_post(value: &Value) -> Result<Post, ValidationError> {
    let mut checker = Checker::default();
    let post = checker.post(value, "");
    checker.finish(post)
}

/// Validates an array of normalized post objects, preserving order.
///
/// # Errors
/// Returns every violation found across all elements.
pub fn validate_posts(value: &Value) -> Result<Vec<Post>, ValidationError> {
    let mut checker = Checker::default();
    let posts = checker.array(value, "", Checker::post);
    checker.finish(posts)
}

fn join(path: &str, key: &str) -> String {
    if path.is_empty() {
        key.to_string()
    } else {
        format!("{path}.{key}")
    }
}

#[derive(Default)]
struct Checker {
    violations: Vec<Violation>,
}

impl Checker {
    fn finish<T>(self, value: Option<T>) -> Result<T, ValidationError> {
        match value {
            Some(value) if self.violations.is_empty() => Ok(value),
            _ => Err(ValidationError {
                violations: self.violations,
            }),
        }
    }

    fn wrong_type(&mut self, path: &str, expected: &'static str) {
        self.violations.push(Violation::WrongType {
            path: path.to_string(),
            expected,
        });
    }

    fn array<T>(
        &mut self,
        value: &Value,
        path: &str,
        element: fn(&mut Self, &Value, &str) -> Option<T>,
    ) -> Option<Vec<T>> {
        let Some(items) = value.as_array() else {
            self.wrong_type(path, "array");
            return None;
        };

        // Visit every element so that all violations are reported.
        let checked: Vec<Option<T>> = items
            .iter()
            .enumerate()
            .map(|(index, item)| element(self, item, &format!("{path}[{index}]")))
            .collect();

        checked.into_iter().collect()
    }

    fn object<'a>(&mut self, value: &'a Value, path: &str) -> Option<&'a Map<String, Value>> {
        let object = value.as_object();
        if object.is_none() {
            self.wrong_type(path, "object");
        }
        object
    }

    fn field<'a>(&mut self, object: &'a Map<String, Value>, path: &str, key: &str) -> Option<&'a Value> {
        let field = object.get(key);
        if field.is_none() {
            self.violations.push(Violation::MissingField {
                path: join(path, key),
            });
        }
        field
    }

    fn string(&mut self, object: &Map<String, Value>, path: &str, key: &str) -> Option<String> {
        let value = self.field(object, path, key)?;
        match value.as_str() {
            Some(text) => Some(text.to_string()),
            None => {
                self.wrong_type(&join(path, key), "string");
                None
            }
        }
    }

    fn id(&mut self, object: &Map<String, Value>, path: &str, key: &str) -> Option<u64> {
        let value = self.field(object, path, key)?;
        let id = value.as_u64();
        if id.is_none() {
            self.wrong_type(&join(path, key), "unsigned integer");
        }
        id
    }

    fn email(&mut self, object: &Map<String, Value>, path: &str, key: &str) -> Option<String> {
        let email = self.string(object, path, key)?;
        if valid_email(&email) {
            Some(email)
        } else {
            self.violations.push(Violation::InvalidFormat {
                path: join(path, key),
                format: "email",
            });
            None
        }
    }

    fn nested<T>(
        &mut self,
        object: &Map<String, Value>,
        path: &str,
        key: &str,
        shape: fn(&mut Self, &Value, &str) -> Option<T>,
    ) -> Option<T> {
        let value = self.field(object, path, key)?;
        shape(self, value, &join(path, key))
    }

    fn geo(&mut self, value: &Value, path: &str) -> Option<Geo> {
        let object = self.object(value, path)?;
        let lat = self.string(object, path, "lat");
        let lng = self.string(object, path, "lng");
        Some(Geo { lat: lat?, lng: lng? })
    }

    fn address(&mut self, value: &Value, path: &str) -> Option<Address> {
        let object = self.object(value, path)?;
        let street = self.string(object, path, "street");
        let suite = self.string(object, path, "suite");
        let city = self.string(object, path, "city");
        let zipcode = self.string(object, path, "zipcode");
        let geo = self.nested(object, path, "geo", Self::geo);
        Some(Address {
            street: street?,
            suite: suite?,
            city: city?,
            zipcode: zipcode?,
            geo: geo?,
        })
    }

    fn company(&mut self, value: &Value, path: &str) -> Option<Company> {
        let object = self.object(value, path)?;
        let name = self.string(object, path, "name");
        let catch_phrase = self.string(object, path, "catchPhrase");
        let bs = self.string(object, path, "bs");
        Some(Company {
            name: name?,
            catch_phrase: catch_phrase?,
            bs: bs?,
        })
    }

    fn user(&mut self, value: &Value, path: &str) -> Option<User> {
        let object = self.object(value, path)?;
        let id = self.id(object, path, "id");
        let name = self.string(object, path, "name");
        let username = self.string(object, path, "username");
        let email = self.email(object, path, "email");
        let address = self.nested(object, path, "address", Self::address);
        let phone = self.string(object, path, "phone");
        let website = self.string(object, path, "website");
        let company = self.nested(object, path, "company", Self::company);
        Some(User {
            id: id?,
            name: name?,
            username: username?,
            email: email?,
            address: address?,
            phone: phone?,
            website: website?,
            company: company?,
        })
    }

    fn post(&mut self, value: &Value, path: &str) -> Option<Post> {
        let object = self.object(value, path)?;
        let id = self.id(object, path, "id");
        let title = self.string(object, path, "title");
        let body = self.string(object, path, "body");
        let user_id = self.id(object, path, "userId");
        Some(Post {
            id: id?,
            title: title?,
            body: body?,
            user_id: user_id?,
        })
    }
}
