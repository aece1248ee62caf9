use crate::pagination::{ButtonKind, PageButton};
use crate::view::PageSnapshot;

fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

fn render_button(button: &PageButton) -> String {
    let mut classes = vec!["btn"];
    match button.kind {
        ButtonKind::First => classes.push("first-page-btn"),
        ButtonKind::Last => classes.push("last-page-btn"),
        ButtonKind::Numbered => {}
    }
    if button.active {
        classes.push("active");
    }
    let style = if button.visible {
        ""
    } else {
        r#" style="visibility: hidden""#
    };
    format!(
        r#"<button class="{}" data-page="{}"{}>{}</button>"#,
        classes.join(" "),
        button.page,
        style,
        escape_html(&button.label)
    )
}

pub fn render_html(snapshot: &PageSnapshot) -> Vec<u8> {
    let mut items = String::new();
    for fact in snapshot.facts.iter() {
        items.push_str(&format!(
            r#"      <div class="facts-list-item">
        <div class="item-content">{}</div>
        <div class="item-footer">
          <div class="author-name">{}</div>
          <div class="upvotes">{}</div>
        </div>
      </div>
"#,
            escape_html(&fact.text),
            escape_html(&fact.author_name),
            fact.upvotes
        ));
    }

    let mut numbered = String::new();
    let mut first = String::new();
    let mut last = String::new();
    for button in snapshot.pagination.buttons.iter() {
        match button.kind {
            ButtonKind::First => first = render_button(button),
            ButtonKind::Last => last = render_button(button),
            ButtonKind::Numbered => numbered.push_str(&render_button(button)),
        }
    }

    let query = snapshot.query.as_deref().unwrap_or("");
    let range = snapshot.pagination.range;

    let html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
  <meta charset="utf-8"/>
  <title>Facts</title>
</head>
<body>
  <main>
    <div class="search">
      <input class="search-field" type="text" value="{query}"/>
    </div>
    <div class="counter">
      Showing <span class="current-interval-start">{start}</span>-<span class="current-interval-end">{end}</span>
      of <span class="total-count">{total}</span>
      (<span class="per-page">{per_page}</span> per page)
    </div>
    <div class="facts-list">
{items}    </div>
    <div class="pagination">
      {first}
      <div class="pages-btns">{numbered}</div>
      {last}
    </div>
  </main>
</body>
</html>
"#,
        query = escape_html(query),
        start = range.start,
        end = range.end,
        total = snapshot.pagination.total_count,
        per_page = snapshot.per_page,
        items = items,
        first = first,
        numbered = numbered,
        last = last,
    );
    html.into_bytes()
}
