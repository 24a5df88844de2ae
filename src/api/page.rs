//! Server-rendered listing page.

use std::fmt::Write;

use crate::domain::{Student, DISPLAY_WIDTH, MAX_NAME_LEN};

const HEAD: &str = r#"<!DOCTYPE html>
<html lang="es">
<head>
    <meta charset="utf-8">
    <meta name="viewport" content="width=device-width, initial-scale=1">
    <title>Alumnos</title>
    <link rel="stylesheet" href="/static/style.css">
</head>
<body>
    <h1>Alumnos</h1>
"#;

const TAIL: &str = r#"    <script src="/static/scripts.js"></script>
</body>
</html>
"#;

/// Render the listing page with the CRUD forms and the given students.
pub fn render_listing(students: &[Student]) -> Result<String, std::fmt::Error> {
    let mut html = String::with_capacity(HEAD.len() + TAIL.len() + students.len() * 96);
    html.push_str(HEAD);

    write_form(&mut html, "create", "Crear", true)?;
    write_form(&mut html, "buscar", "Buscar", false)?;
    write_form(&mut html, "update", "Actualizar", true)?;
    write_form(&mut html, "delete", "Eliminar", false)?;

    writeln!(html, "    <section id=\"read\">")?;
    writeln!(html, "        <h2>Registros ({})</h2>", students.len())?;
    writeln!(html, "        <ul>")?;
    for student in students {
        let identifier = escape_html(&student.identifier);
        writeln!(
            html,
            "            <li data-matricula=\"{identifier}\">{identifier}, {}, {}</li>",
            escape_html(&student.name),
            student.age
        )?;
    }
    writeln!(html, "        </ul>")?;
    writeln!(html, "    </section>")?;

    html.push_str(TAIL);
    Ok(html)
}

fn write_form(html: &mut String, id: &str, label: &str, full: bool) -> std::fmt::Result {
    writeln!(html, "    <section id=\"{id}\">")?;
    writeln!(html, "        <h2>{label}</h2>")?;
    writeln!(
        html,
        "        <input id=\"{id}-matricula\" placeholder=\"Matricula\" maxlength=\"{DISPLAY_WIDTH}\">"
    )?;
    if full {
        writeln!(
            html,
            "        <input id=\"{id}-nombre\" placeholder=\"Nombre\" maxlength=\"{MAX_NAME_LEN}\">"
        )?;
        writeln!(
            html,
            "        <input id=\"{id}-edad\" placeholder=\"Edad\" maxlength=\"2\" inputmode=\"numeric\">"
        )?;
    }
    writeln!(html, "        <button id=\"{id}-submit\">{label}</button>")?;
    writeln!(html, "    </section>")
}

/// Escape the characters that are significant in HTML text and attributes.
pub fn escape_html(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            _ => escaped.push(c),
        }
    }
    escaped
}
