//! Shared HTML page shell

use axum::{
    http::{header, StatusCode},
    response::{IntoResponse, Response},
};

/// Wrap `slot` in the page shell and return it as a `text/html` response.
///
/// A non-empty `lacks` adds a "Debug Status" line naming the missing
/// configuration keys in the order given.
pub fn render_page(slot: &str, status: StatusCode, lacks: &[&str]) -> Response {
    (
        status,
        [(header::CONTENT_TYPE, "text/html")],
        page_html(slot, lacks),
    )
        .into_response()
}

pub fn page_html(slot: &str, lacks: &[&str]) -> String {
    let debug_status = if lacks.is_empty() {
        String::new()
    } else {
        format!("<h5>Debug Status: {}</h5>", lacks.join(", "))
    };

    format!(r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1, shrink-to-fit=no">
    <link href="https://cdn.jsdelivr.net/npm/bootstrap@5.1.3/dist/css/bootstrap.min.css" rel="stylesheet"
        integrity="sha384-1BmE4kWBq78iYhFldvKuhfTAU6auU8tT94WrHftjDbrCEXSU1oBoqyl2QvZ6jIW3" crossorigin="anonymous">
    <title>Auth Login Gateway</title>
    <style>
        html,
        body {{
            height: 100%;
        }}
        body {{
            display: flex;
            align-items: center;
            background-color: #f5f5f5;
        }}
    </style>
</head>
<body>
    <div class="container w-70">
        <div class="text-center">
            <h2 class="mb-4">Auth Login Worker</h2>
            {slot}
        </div>
        <br />
        <br />
        <div class="text-center">
            {debug_status}
        </div>
    </div>
    <script src="https://cdn.jsdelivr.net/npm/bootstrap@5.1.3/dist/js/bootstrap.bundle.min.js"
        integrity="sha384-ka7Sk0Gln4gmtz2MlQnikT1wXgYsOg+OMhuP+IlRH9sENBO0LRn5q+8nbTov4+1p"
        crossorigin="anonymous"></script>
</body>
</html>
"#)
}
