//! HTML pages. The landing page is rendered inline; everything else comes from the public dir.

use axum::response::Html;
use chrono::{Datelike, Utc};

const LANDING_TEMPLATE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1" />
  <title>Dunder Mifflin Infinity</title>
  <link href="https://cdn.jsdelivr.net/npm/bootstrap@5.3.0/dist/css/bootstrap.min.css" rel="stylesheet" />
  <style>
    body { background: #f4f6f9; font-family: 'Segoe UI', Tahoma, Geneva, Verdana, sans-serif; }
    .navbar-brand { font-weight: bold; font-size: 1.5rem; color: #00529b !important; }
    .hero { text-align: center; padding: 80px 20px; background: linear-gradient(135deg, #00529b, #0073e6); color: white; }
    .hero h1 { font-size: 3rem; font-weight: bold; }
    footer { margin-top: 60px; padding: 20px; background: #00529b; color: white; text-align: center; }
  </style>
</head>
<body>
  <nav class="navbar navbar-expand-lg navbar-dark bg-dark">
    <div class="container">
      <a class="navbar-brand" href="/">Dunder Mifflin Infinity</a>
      <ul class="navbar-nav ms-auto">
        <li class="nav-item"><a class="nav-link" href="student-crud.html">Order Paper</a></li>
        <li class="nav-item"><a class="nav-link" href="traditional-forms.html">Traditional Forms</a></li>
        <li class="nav-item"><a class="nav-link" href="/spencer">Contact Us</a></li>
      </ul>
    </div>
  </nav>
  <section class="hero">
    <h1>Welcome to Dunder Mifflin Infinity</h1>
    <p>&ldquo;Limitless paper in a paperless world.&rdquo;</p>
    <a href="student-crud.html" class="btn btn-light btn-lg mt-3">Order Paper</a>
  </section>
  <footer>&copy; {year} Dunder Mifflin, Inc. | Infinity Portal</footer>
</body>
</html>
"#;

pub fn render_landing(year: i32) -> String {
    LANDING_TEMPLATE.replace("{year}", &year.to_string())
}

pub async fn landing() -> Html<String> {
    Html(render_landing(Utc::now().year()))
}
