//! Server-rendered HTML. Every user-supplied value goes through [`escape`].

use tasklist_types::models::Task;

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en"><head>
<meta charset="utf-8"><meta name="viewport" content="width=device-width,initial-scale=1">
<title>{title}</title>
<link rel="stylesheet" href="/static/css/style.css">
</head><body>
{body}
<script src="/static/js/scripts.js"></script>
</body></html>"#
    )
}

fn error_banner(error: Option<&str>) -> String {
    error
        .map(|e| format!(r#"<div class="error">{}</div>"#, escape(e)))
        .unwrap_or_default()
}

pub fn login_page(error: Option<&str>) -> String {
    let body = format!(
        r#"<div class="card">
  <h1>Log in</h1>
  {error_html}
  <form method="POST" action="/login">
    <input type="text" name="username" placeholder="Username" required autocomplete="username">
    <input type="password" name="password" placeholder="Password" required autocomplete="current-password">
    <button type="submit">Log in</button>
  </form>
  <p class="link">No account? <a href="/register">Register</a></p>
</div>"#,
        error_html = error_banner(error),
    );
    layout("Log in", &body)
}

pub fn register_page(error: Option<&str>) -> String {
    let body = format!(
        r#"<div class="card">
  <h1>Register</h1>
  {error_html}
  <form method="POST" action="/register">
    <input type="text" name="username" placeholder="Username" required autocomplete="username">
    <input type="password" name="password" placeholder="Password" required autocomplete="new-password">
    <input type="password" name="confirmPassword" placeholder="Confirm password" required autocomplete="new-password">
    <button type="submit">Register</button>
  </form>
  <p class="link">Already registered? <a href="/login">Log in</a></p>
</div>"#,
        error_html = error_banner(error),
    );
    layout("Register", &body)
}

pub fn index_page(tasks: &[Task]) -> String {
    let items: String = tasks.iter().map(task_item).collect();
    let list = if tasks.is_empty() {
        r#"<p class="empty">Nothing to do.</p>"#.to_string()
    } else {
        format!(r#"<ul class="tasks">{items}</ul>"#)
    };

    let body = format!(
        r#"<div class="card wide">
  <header><h1>Tasks</h1><a href="/logout">Log out</a></header>
  <form method="POST" action="/add" class="add">
    <input type="text" name="title" placeholder="Title" required>
    <input type="text" name="description" placeholder="Description">
    <button type="submit">Add</button>
  </form>
  {list}
</div>"#
    );
    layout("Tasks", &body)
}

fn task_item(task: &Task) -> String {
    let id = task.id.simple();
    let title = escape(&task.title);
    let description = escape(&task.description);
    let (class, mark) = if task.status { ("done", "Undo") } else { ("open", "Done") };

    format!(
        r#"
    <li class="{class}">
      <span class="title">{title}</span>
      <span class="description">{description}</span>
      <a href="/toggle?id={id}">{mark}</a>
      <button type="button" class="edit-btn">Edit</button>
      <a href="/delete?id={id}">Delete</a>
      <div class="edit-container">
        <form method="POST" action="/edit">
          <input type="hidden" name="id" value="{id}">
          <input type="text" name="title" value="{title}" required>
          <input type="text" name="description" value="{description}">
          <button type="submit">Save</button>
        </form>
      </div>
    </li>"#
    )
}

pub fn escape(raw: &str) -> String {
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

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use uuid::Uuid;

    #[test]
    fn escapes_markup() {
        assert_eq!(
            escape(r#"<script>alert("x") & 'y'</script>"#),
            "&lt;script&gt;alert(&quot;x&quot;) &amp; &#x27;y&#x27;&lt;/script&gt;"
        );
    }

    #[test]
    fn index_renders_escaped_tasks() {
        let now = Utc::now();
        let task = Task {
            id: Uuid::new_v4(),
            owner_id: Uuid::new_v4(),
            title: "<b>bold</b>".to_string(),
            description: "fish & chips".to_string(),
            status: true,
            created_at: now,
            updated_at: now,
        };

        let html = index_page(&[task.clone()]);
        assert!(html.contains("&lt;b&gt;bold&lt;/b&gt;"));
        assert!(html.contains("fish &amp; chips"));
        assert!(html.contains(&format!("/toggle?id={}", task.id.simple())));
        assert!(html.contains(r#"class="done""#));
        assert!(!html.contains("<b>bold</b>"));
    }

    #[test]
    fn form_error_is_shown() {
        let html = login_page(Some("Invalid username or password"));
        assert!(html.contains(r#"<div class="error">Invalid username or password</div>"#));
        assert!(!register_page(None).contains(r#"class="error""#));
    }
}
