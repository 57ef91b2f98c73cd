//! Static body served to browsers when a request is blocked.

/// Fixed HTML document written on a blocked request whose `Accept` asks for HTML.
pub static FORBIDDEN_PAGE: &str = r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0, user-scalable=no">
    <title>Forbidden</title>
</head>
<body>
    <div>Forbidden</div>
</body>
</html>"#;
