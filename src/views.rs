// src/views.rs

//! Server-side view layer.
//!
//! Each function renders one named view into a complete HTML document. The
//! contract with handlers is deliberately thin: a view receives its context
//! as plain arguments and returns the response body as a string.

use chrono::{DateTime, Utc};

use crate::models::{message::MessageWithUsers, post::Post};
use crate::utils::flash::Flash;
use crate::utils::html::{clean_html, escape_text};
use crate::utils::session::CurrentUser;

fn layout(title: &str, notice: Option<&Flash>, body: &str) -> String {
    let notice = notice
        .map(|f| {
            format!(
                "<p class=\"notice {}\">{}</p>\n",
                escape_text(&f.category),
                escape_text(&f.message)
            )
        })
        .unwrap_or_default();

    format!(
        "<!DOCTYPE html>\n<html>\n<head><meta charset=\"utf-8\"><title>{}</title></head>\n<body>\n{}{}\n</body>\n</html>\n",
        escape_text(title),
        notice,
        body
    )
}

fn format_timestamp(ts: &DateTime<Utc>) -> String {
    ts.format("%Y-%m-%d %H:%M").to_string()
}

/// Chat landing view for authenticated visitors.
pub fn main_chat(user: &CurrentUser, notice: Option<&Flash>) -> String {
    let body = format!(
        "<h1>Welcome back, {}</h1>\n\
         <ul>\n\
         <li><a href=\"/messages\">Your messages</a></li>\n\
         <li><a href=\"/new_message\">Send a message</a></li>\n\
         <li><a href=\"/posts\">Post feed</a></li>\n\
         <li><a href=\"/new_post\">Write a post</a></li>\n\
         <li><a href=\"/logout\">Log out</a></li>\n\
         </ul>",
        escape_text(&user.username)
    );
    layout("Chat", notice, &body)
}

/// Post feed, newest first. Post content is sanitized, everything else is
/// escaped.
pub fn home(posts: &[Post], notice: Option<&Flash>) -> String {
    let mut items = String::new();
    for post in posts {
        items.push_str(&format!(
            "<article>\n<h2>{}</h2>\n<p class=\"date\">{}</p>\n<div>{}</div>\n</article>\n",
            escape_text(&post.title),
            format_timestamp(&post.date_posted),
            clean_html(&post.content)
        ));
    }
    if items.is_empty() {
        items.push_str("<p>No posts yet.</p>\n");
    }

    let body = format!(
        "<h1>Latest posts</h1>\n{}<p><a href=\"/login\">Log in</a> or <a href=\"/register\">register</a> to join the conversation.</p>",
        items
    );
    layout("Home", notice, &body)
}

/// Registration form.
pub fn register(notice: Option<&Flash>) -> String {
    let body = "<h1>Register</h1>\n\
        <form method=\"post\" action=\"/register\">\n\
        <label>Username <input type=\"text\" name=\"username\"></label><br>\n\
        <label>Email <input type=\"email\" name=\"email\"></label><br>\n\
        <label>Password <input type=\"password\" name=\"password\"></label><br>\n\
        <button type=\"submit\">Create account</button>\n\
        </form>\n\
        <p>Already registered? <a href=\"/login\">Log in</a></p>";
    layout("Register", notice, body)
}

/// Login form. `next` is carried through the form action so a successful
/// login can replay the originally requested path.
pub fn login(next: Option<&str>, notice: Option<&Flash>) -> String {
    let action = match next {
        Some(next) => format!("/login?next={}", escape_text(next)),
        None => "/login".to_string(),
    };

    let body = format!(
        "<h1>Log in</h1>\n\
         <form method=\"post\" action=\"{}\">\n\
         <label>Email <input type=\"email\" name=\"email\"></label><br>\n\
         <label>Password <input type=\"password\" name=\"password\"></label><br>\n\
         <button type=\"submit\">Log in</button>\n\
         </form>\n\
         <p>New here? <a href=\"/register\">Register</a></p>",
        action
    );
    layout("Log in", notice, &body)
}

/// Message list for the current user, newest first.
pub fn messages(user: &CurrentUser, chats: &[MessageWithUsers], notice: Option<&Flash>) -> String {
    let user_id = user.id();
    let mut items = String::new();
    for chat in chats {
        let (direction, other) = if chat.sender_id == Some(user_id) {
            ("To", chat.recipient_username.as_deref().unwrap_or("unknown"))
        } else {
            ("From", chat.sender_username.as_deref().unwrap_or("unknown"))
        };
        items.push_str(&format!(
            "<li><span class=\"date\">{}</span> <strong>{} {}</strong>: {}</li>\n",
            format_timestamp(&chat.timestamp),
            direction,
            escape_text(other),
            escape_text(chat.body.as_deref().unwrap_or(""))
        ));
    }
    if items.is_empty() {
        items.push_str("<li>No messages yet.</li>\n");
    }

    let body = format!(
        "<h1>Messages</h1>\n<ul>\n{}</ul>\n<p><a href=\"/new_message\">Send a message</a> | <a href=\"/\">Back</a></p>",
        items
    );
    layout("Messages", notice, &body)
}

/// Message composition form. The recipient is addressed by email.
pub fn new_message(notice: Option<&Flash>) -> String {
    let body = "<h1>New message</h1>\n\
        <form method=\"post\" action=\"/new_message\">\n\
        <label>Recipient email <input type=\"email\" name=\"recipient\"></label><br>\n\
        <label>Message <textarea name=\"body\" maxlength=\"140\"></textarea></label><br>\n\
        <button type=\"submit\">Send</button>\n\
        </form>\n\
        <p><a href=\"/messages\">Back to messages</a></p>";
    layout("New message", notice, body)
}

/// Post composition form.
pub fn new_post(notice: Option<&Flash>) -> String {
    let body = "<h1>New post</h1>\n\
        <form method=\"post\" action=\"/new_post\">\n\
        <label>Title <input type=\"text\" name=\"title\"></label><br>\n\
        <label>Content <textarea name=\"content\"></textarea></label><br>\n\
        <button type=\"submit\">Publish</button>\n\
        </form>\n\
        <p><a href=\"/posts\">Back to the feed</a></p>";
    layout("New post", notice, body)
}

/// Error page used by the central error type.
pub fn error_page(status: u16, message: &str) -> String {
    let body = format!(
        "<h1>{}</h1>\n<p>{}</p>\n<p><a href=\"/\">Home</a></p>",
        status,
        escape_text(message)
    );
    layout("Error", None, &body)
}
