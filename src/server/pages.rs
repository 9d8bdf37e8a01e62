//! HTML pages for the file view and the error view.

use crate::slice::FileSlice;

/// Escape HTML special characters to prevent XSS attacks.
pub fn html_escape(s: &str) -> String {
    let mut result = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => result.push_str("&amp;"),
            '<' => result.push_str("&lt;"),
            '>' => result.push_str("&gt;"),
            '"' => result.push_str("&quot;"),
            '\'' => result.push_str("&#x27;"),
            _ => result.push(c),
        }
    }
    result
}

const STYLE: &str = r#"
        * { box-sizing: border-box; }
        body {
            margin: 0;
            background: #fafafa;
            color: #1f2328;
            font-family: -apple-system, BlinkMacSystemFont, 'Segoe UI', Roboto, Ubuntu, sans-serif;
        }
        header {
            padding: 16px 24px;
            border-bottom: 1px solid #d0d7de;
            background: #fff;
        }
        header h1 { font-size: 18px; margin: 0 0 4px; word-break: break-all; }
        header .meta { font-size: 12px; color: #656d76; }
        form.range { margin-top: 12px; font-size: 13px; }
        form.range input { width: 80px; padding: 2px 6px; }
        main { padding: 16px 24px; }
        pre {
            margin: 0;
            padding: 16px;
            background: #fff;
            border: 1px solid #d0d7de;
            border-radius: 6px;
            overflow-x: auto;
            font-size: 13px;
            line-height: 1.45;
        }
        .error {
            padding: 16px 20px;
            border-radius: 6px;
            background: #ffebe9;
            border: 1px solid #ff8182;
            color: #82071e;
        }
        a { color: #0969da; }
"#;

/// Render the page showing a slice of a file.
///
/// Line inputs are pre-filled with the range that produced the slice.
pub fn render_file_page(slice: &FileSlice) -> String {
    let escaped_filename = html_escape(&slice.filename);
    let escaped_content = html_escape(&slice.content);
    let encoded_filename = urlencoding::encode(&slice.filename);

    let start_value = slice.range.start.map(|n| n.to_string()).unwrap_or_default();
    let end_value = slice.range.end.map(|n| n.to_string()).unwrap_or_default();

    let shown = if slice.range.is_full() {
        "all lines".to_string()
    } else {
        format!(
            "lines {}&ndash;{}",
            slice.range.start.unwrap_or(0),
            slice
                .range
                .end
                .map(|n| n.to_string())
                .unwrap_or_else(|| "end".to_string())
        )
    };

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>{escaped_filename}</title>
    <style>{STYLE}</style>
</head>
<body>
    <header>
        <h1>{escaped_filename}</h1>
        <div class="meta">
            {shown} of {total_lines} &middot; {encoding} &middot;
            <a href="/static_files/{encoded_filename}">raw</a>
        </div>
        <form class="range" method="get" action="/{encoded_filename}">
            <label>Start line <input type="number" min="0" name="start_line" value="{start_value}"></label>
            <label>End line <input type="number" min="0" name="end_line" value="{end_value}"></label>
            <button type="submit">Show</button>
        </form>
    </header>
    <main>
        <pre>{escaped_content}</pre>
    </main>
</body>
</html>
"##,
        total_lines = slice.total_lines,
        encoding = html_escape(slice.encoding),
    )
}

/// Render the error page with a user-facing message.
pub fn render_error_page(message: &str) -> String {
    let escaped_message = html_escape(message);

    format!(
        r##"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="UTF-8">
    <meta name="viewport" content="width=device-width, initial-scale=1.0">
    <title>Error</title>
    <style>{STYLE}</style>
</head>
<body>
    <main>
        <div class="error">{escaped_message}</div>
    </main>
</body>
</html>
"##
    )
}
