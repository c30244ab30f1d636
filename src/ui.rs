use crate::models::{AggregatedEntry, StoreSnapshot};

const EDIT_ACTION: &str = "/entries/edit";
const DELETE_ACTION: &str = "/entries/delete";

pub fn render_index(snapshot: &StoreSnapshot) -> String {
    let rows: String = snapshot.entries.iter().map(render_row).collect();
    INDEX_HTML
        .replace("{{FORM_DATE}}", &escape_html(&snapshot.form.date))
        .replace("{{FORM_DISTANCE}}", &escape_html(&snapshot.form.distance))
        .replace("{{ROWS}}", &rows)
}

/// One aggregated row. The pencil and cross post the row's date back to the
/// edit and delete routes; the row itself holds nothing.
pub fn render_row(entry: &AggregatedEntry) -> String {
    let date = escape_html(&entry.date);
    ROW_HTML
        .replace("{{EDIT_ACTION}}", EDIT_ACTION)
        .replace("{{DELETE_ACTION}}", DELETE_ACTION)
        .replace("{{DISTANCE}}", &entry.distance.to_string())
        .replace("{{DATE}}", &date)
}

fn escape_html(value: &str) -> String {
    let mut out = String::with_capacity(value.len());
    for ch in value.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            // Keeps user text from ever matching a template placeholder.
            '{' => out.push_str("&#123;"),
            '}' => out.push_str("&#125;"),
            _ => out.push(ch),
        }
    }
    out
}

const ROW_HTML: &str = r#"      <div class="row">
        <div>{{DATE}}</div>
        <div>{{DISTANCE}}</div>
        <div class="edit-buttons">
          <form method="post" action="{{EDIT_ACTION}}">
            <input type="hidden" name="date" value="{{DATE}}" />
            <button type="submit" class="pencil" title="Edit">&#9998;</button>
          </form>
          <form method="post" action="{{DELETE_ACTION}}">
            <input type="hidden" name="date" value="{{DATE}}" />
            <button type="submit" class="cross" title="Delete">&#10008;</button>
          </form>
        </div>
      </div>
"#;

const INDEX_HTML: &str = r#"<!DOCTYPE html>
<html lang="ru">
<head>
  <meta charset="UTF-8" />
  <meta name="viewport" content="width=device-width, initial-scale=1.0" />
  <title>Учёт тренировок</title>
  <style>
    :root {
      --ink: #2b2a28;
      --muted: #8b857d;
      --line: rgba(47, 72, 88, 0.16);
      --accent: #2f4858;
    }

    * {
      box-sizing: border-box;
    }

    body {
      margin: 0;
      min-height: 100vh;
      background: #f8f3e6;
      color: var(--ink);
      font-family: "Trebuchet MS", sans-serif;
      display: grid;
      place-items: start center;
      padding: 48px 18px;
    }

    .container {
      width: min(560px, 100%);
      display: grid;
      gap: 18px;
    }

    .input-data {
      display: grid;
      grid-template-columns: 1fr 1fr auto;
      gap: 12px;
      align-items: end;
    }

    .item {
      display: grid;
      gap: 6px;
    }

    .item input {
      padding: 10px 12px;
      border: 1px solid var(--line);
      border-radius: 6px;
      font-size: 1rem;
    }

    .btn {
      padding: 10px 20px;
      border: none;
      border-radius: 6px;
      background: var(--accent);
      color: white;
      font-size: 1rem;
      cursor: pointer;
    }

    .title-box,
    .row {
      display: grid;
      grid-template-columns: 1fr 1fr 1fr;
      align-items: center;
      padding: 8px 12px;
    }

    .title-box {
      color: var(--muted);
      font-size: 0.9rem;
    }

    .result {
      border: 1px solid var(--line);
      border-radius: 8px;
      background: white;
    }

    .row + .row {
      border-top: 1px solid var(--line);
    }

    .edit-buttons {
      display: flex;
      gap: 8px;
    }

    .edit-buttons form {
      margin: 0;
    }

    .edit-buttons button {
      border: none;
      background: transparent;
      font-size: 1.1rem;
      cursor: pointer;
    }
  </style>
</head>
<body>
  <div class="container">
    <form class="input-data" method="post" action="/submit">
      <div class="date-box item">
        <label for="input-date">Дата</label>
        <input type="date" name="date" id="input-date" value="{{FORM_DATE}}" />
      </div>

      <div class="km-box item">
        <label for="input-distance">Пройдено км</label>
        <input type="text" name="distance" id="input-distance" value="{{FORM_DISTANCE}}" />
      </div>

      <div class="button-box">
        <button type="submit" class="btn">Ok</button>
      </div>
    </form>

    <div class="title-box">
      <div>Дата(ДД.ММ.ГГ)</div>
      <div>Пройдено км</div>
      <div>Действия</div>
    </div>

    <div class="result">
{{ROWS}}    </div>
  </div>

  <script>
    const fields = document.querySelectorAll('.input-data input');

    fields.forEach((input) => {
      input.addEventListener('input', () => {
        fetch(`/api/form/${input.name}`, {
          method: 'PUT',
          headers: { 'content-type': 'application/json' },
          body: JSON.stringify({ value: input.value })
        }).catch(() => {});
      });
    });
  </script>
</body>
</html>
"#;
