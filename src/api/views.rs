//! Server-rendered pages. Plain `format!` templates; every piece of
//! user-supplied text goes through [`escape`].

use crate::auth::session::SessionUser;
use crate::db::models::Book;

fn escape(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            _ => out.push(c),
        }
    }
    out
}

fn base_style() -> &'static str {
    r#"
    * { box-sizing: border-box; }
    body {
        font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, sans-serif;
        background: #f5f5f5; color: #333; margin: 0; padding: 40px 20px;
    }
    .card {
        background: #fff; border-radius: 12px; padding: 28px;
        max-width: 640px; margin: 0 auto; box-shadow: 0 4px 24px rgba(0,0,0,0.08);
    }
    h1 { margin-top: 0; font-size: 24px; }
    .form-group { margin-bottom: 14px; }
    .form-group label { display: block; font-size: 14px; margin-bottom: 6px; }
    .form-group input { width: 100%; padding: 10px 12px; border: 1px solid #ccc; border-radius: 8px; }
    .btn { padding: 10px 18px; border: none; border-radius: 8px; background: #4a6cf7; color: #fff; cursor: pointer; }
    .error { background: #fff0f0; color: #d32f2f; padding: 10px 14px; border-radius: 8px; margin-bottom: 14px; }
    table { width: 100%; border-collapse: collapse; }
    th, td { text-align: left; padding: 8px; border-bottom: 1px solid #eee; }
    nav a { margin-right: 12px; }
    "#
}

fn page(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en"><head>
<meta charset="utf-8"><meta name="viewport" content="width=device-width,initial-scale=1">
<title>{title} - Bookshelf</title>
<style>{style}</style>
</head><body>
<div class="card">
{body}
</div>
</body></html>"#,
        style = base_style(),
    )
}

fn error_banner(error: Option<&str>) -> String {
    error
        .map(|e| format!(r#"<div class="error">{}</div>"#, escape(e)))
        .unwrap_or_default()
}

pub fn home(user: Option<&SessionUser>) -> String {
    let nav = match user {
        Some(user) => format!(
            r#"<p>Signed in as {}.</p>
<nav><a href="/dashboard">My books</a><a href="/logout">Log out</a></nav>"#,
            escape(&user.name)
        ),
        None => {
            r#"<nav><a href="/login">Log in</a><a href="/signup">Sign up</a></nav>"#.to_string()
        }
    };

    page(
        "Home",
        &format!("<h1>Bookshelf</h1>\n<p>Keep track of the books you own.</p>\n{nav}"),
    )
}

pub fn signup(error: Option<&str>) -> String {
    let body = format!(
        r#"<h1>Sign up</h1>
{error_html}
<form method="POST" action="/signup">
  <div class="form-group"><label>Name</label><input type="text" name="name" required></div>
  <div class="form-group"><label>Email</label><input type="email" name="email" required></div>
  <div class="form-group"><label>Password</label><input type="password" name="password" required></div>
  <button type="submit" class="btn">Create account</button>
</form>
<p>Already registered? <a href="/login">Log in</a></p>"#,
        error_html = error_banner(error),
    );
    page("Sign up", &body)
}

pub fn login(error: Option<&str>) -> String {
    let body = format!(
        r#"<h1>Log in</h1>
{error_html}
<form method="POST" action="/login">
  <div class="form-group"><label>Email</label><input type="email" name="email" required></div>
  <div class="form-group"><label>Password</label><input type="password" name="password" required></div>
  <button type="submit" class="btn">Log in</button>
</form>
<p>No account? <a href="/signup">Sign up</a></p>"#,
        error_html = error_banner(error),
    );
    page("Log in", &body)
}

pub fn dashboard(username: &str, books: &[Book]) -> String {
    let rows = if books.is_empty() {
        r#"<tr><td colspan="3">No books yet.</td></tr>"#.to_string()
    } else {
        books
            .iter()
            .map(|book| {
                format!(
                    r#"<tr><td>{title}</td><td>{author}</td><td><a href="/edit/{id}">Edit</a> <a href="/delete/{id}">Delete</a></td></tr>"#,
                    title = escape(&book.title),
                    author = escape(&book.author),
                    id = book.id,
                )
            })
            .collect::<Vec<_>>()
            .join("\n")
    };

    let body = format!(
        r#"<h1>Welcome, {name}</h1>
<nav><a href="/add">Add book</a><a href="/logout">Log out</a></nav>
<table>
<thead><tr><th>Title</th><th>Author</th><th></th></tr></thead>
<tbody>
{rows}
</tbody>
</table>"#,
        name = escape(username),
    );
    page("My books", &body)
}

pub fn add_book() -> String {
    page(
        "Add book",
        r#"<h1>Add book</h1>
<form method="POST" action="/add">
  <div class="form-group"><label>Title</label><input type="text" name="title"></div>
  <div class="form-group"><label>Author</label><input type="text" name="author"></div>
  <button type="submit" class="btn">Save</button>
</form>
<p><a href="/dashboard">Back</a></p>"#,
    )
}

pub fn edit_book(book: &Book) -> String {
    let body = format!(
        r#"<h1>Edit book</h1>
<form method="POST" action="/edit/{id}">
  <div class="form-group"><label>Title</label><input type="text" name="title" value="{title}"></div>
  <div class="form-group"><label>Author</label><input type="text" name="author" value="{author}"></div>
  <button type="submit" class="btn">Update</button>
</form>
<p><a href="/dashboard">Back</a></p>"#,
        id = book.id,
        title = escape(&book.title),
        author = escape(&book.author),
    );
    page("Edit book", &body)
}
