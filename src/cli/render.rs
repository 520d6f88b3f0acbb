//! Plain-text views for the terminal: the user list, the user detail page, and
//! the post list.

use crate::model::{Post, User};

#[must_use]
pub fn user_list(users: &[User]) -> String {
    let mut lines = vec![format!("Users ({})", users.len())];

    if users.is_empty() {
        lines.push("No users found".to_string());
    }

    for user in users {
        lines.push(format!(
            "{:>3}  {} (@{})  {}  [{}]",
            user.id, user.name, user.username, user.email, user.company.name
        ));
    }

    lines.join("\n")
}

#[must_use]
pub fn user_detail(user: &User) -> String {
    let initial = user
        .name
        .chars()
        .next()
        .map(|c| c.to_uppercase().to_string())
        .unwrap_or_default();

    [
        format!("[{initial}] {} (@{})", user.name, user.username),
        user.email.clone(),
        String::new(),
        "Contact".to_string(),
        format!("  Email:    {}", user.email),
        format!("  Phone:    {}", user.phone),
        format!("  Website:  http://{}", user.website),
        String::new(),
        "Address".to_string(),
        format!("  {} {}", user.address.street, user.address.suite),
        format!("  {}, {}", user.address.city, user.address.zipcode),
        format!("  Coordinates: {}, {}", user.address.geo.lat, user.address.geo.lng),
        String::new(),
        "Company".to_string(),
        format!("  Name:     {}", user.company.name),
        format!("  Slogan:   \"{}\"", user.company.catch_phrase),
        format!("  Business: {}", user.company.bs),
    ]
    .join("\n")
}

#[must_use]
pub fn post_list(posts: &[Post]) -> String {
    if posts.is_empty() {
        return "This user has no posts".to_string();
    }

    let mut lines = vec![format!("Posts ({})", posts.len())];
    for post in posts {
        lines.push(String::new());
        lines.push(format!("#{} {}", post.id, post.title));
        lines.push(post.body.clone());
    }
    lines.join("\n")
}
