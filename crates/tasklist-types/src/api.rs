use serde::Deserialize;

// -- Auth --

/// Missing form fields deserialize as empty strings so the handlers can
/// report "All fields are required" instead of a bare 422.
#[derive(Debug, Default, Deserialize)]
pub struct RegisterForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
    #[serde(default, rename = "confirmPassword")]
    pub confirm_password: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct LoginForm {
    #[serde(default)]
    pub username: String,
    #[serde(default)]
    pub password: String,
}

// -- Tasks --

#[derive(Debug, Default, Deserialize)]
pub struct AddTaskForm {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

#[derive(Debug, Default, Deserialize)]
pub struct EditTaskForm {
    #[serde(default)]
    pub id: String,
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub description: String,
}

/// `?id=` on the toggle and delete routes. Kept as a raw string so that a
/// malformed id is reported as 400 by the handler rather than by the extractor.
#[derive(Debug, Default, Deserialize)]
pub struct TaskIdQuery {
    #[serde(default)]
    pub id: String,
}
