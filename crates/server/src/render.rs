//! Minimal HTML views for the page models.

use std::fmt::Write as _;

use pages::model::{CategoryPage, HomePage, Price, ProductCard, ProductPage};
use shared::{domain::PageLink, error::ApiError};

pub(crate) fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}

pub(crate) fn format_price(price: &Price) -> String {
    let symbol = match price.currency.as_str() {
        "USD" => "$",
        "EUR" => "€",
        "GBP" => "£",
        _ => "",
    };
    if symbol.is_empty() {
        format!("{} {:.2}", price.currency, price.value)
    } else {
        format!("{symbol}{:.2}", price.value)
    }
}

fn layout(title: &str, pages: &[PageLink], body: &str) -> String {
    let mut nav = String::new();
    for link in pages {
        let _ = write!(
            nav,
            r#"<li><a href="{}">{}</a></li>"#,
            escape(&link.path),
            escape(&link.title)
        );
    }

    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head><meta charset="utf-8"><title>{}</title></head>
<body>
<nav><ul>{nav}</ul></nav>
<main>{body}</main>
<div id="cart-panels"></div>
</body>
</html>"#,
        escape(title)
    )
}

pub(crate) fn home_page(model: &HomePage, pages: &[PageLink]) -> String {
    layout(&model.title, pages, "<section><h1>Homepage</h1></section>")
}

pub(crate) fn category_page(model: &CategoryPage, pages: &[PageLink]) -> String {
    let mut body = format!(
        r#"<section class="category {}"><h1>{}</h1>"#,
        escape(&model.styling),
        escape(&model.name)
    );
    if let Some(url) = &model.banner_url {
        let _ = write!(body, r#"<img class="banner" src="{}" alt="Hero">"#, escape(url));
    }
    if let Some(description) = &model.description {
        let _ = write!(body, r#"<div class="description">{}</div>"#, escape(description));
    }
    body.push_str(r#"<div class="products">"#);
    for card in &model.products {
        body.push_str(&product_card(card));
    }
    body.push_str("</div></section>");

    layout(&model.name, pages, &body)
}

fn product_card(card: &ProductCard) -> String {
    let class = if card.highlighted {
        "product-card highlighted"
    } else {
        "product-card"
    };
    let mut html = format!(
        r#"<article class="{class}" data-sku="{}"><a href="/catalog/product/{}">"#,
        escape(&card.sku),
        escape(&card.url_key)
    );
    if let Some(url) = &card.image_url {
        let loading = if card.priority { "eager" } else { "lazy" };
        let _ = write!(
            html,
            r#"<img src="{}" alt="{}" loading="{loading}">"#,
            escape(url),
            escape(&card.image_label)
        );
    }
    let _ = write!(html, "<h3>{}</h3>", escape(&card.name));
    if let Some(price) = &card.price {
        let _ = write!(html, r#"<p class="price">{}</p>"#, escape(&format_price(price)));
    }
    html.push_str("</a></article>");
    html
}

pub(crate) fn product_page(model: &ProductPage, pages: &[PageLink]) -> String {
    let mut body = format!(r#"<section class="product {}">"#, escape(&model.styling));

    body.push_str(r#"<nav class="breadcrumbs"><a href="/">Home</a>"#);
    for crumb in &model.breadcrumbs {
        let _ = write!(
            body,
            r#" / <a href="/catalog/category/{}">{}</a>"#,
            escape(&crumb.url_path),
            escape(&crumb.name)
        );
    }
    let _ = write!(body, " / <span>{}</span></nav>", escape(&model.name));

    if let Some(url) = &model.banner_url {
        let _ = write!(body, r#"<img class="banner" src="{}" alt="Hero">"#, escape(url));
    }

    body.push_str(r#"<div class="gallery">"#);
    for image in &model.gallery {
        let _ = write!(
            body,
            r#"<img src="{}" alt="{}">"#,
            escape(&image.url),
            escape(&image.label)
        );
    }
    body.push_str("</div>");

    let _ = write!(body, "<h1>{}</h1>", escape(&model.name));
    if let Some(price) = &model.price {
        let _ = write!(body, r#"<p class="price">{}</p>"#, escape(&format_price(price)));
    }

    body.push_str(r#"<form class="options">"#);
    for option in &model.options {
        let _ = write!(
            body,
            r#"<label>{}<select name="{}">"#,
            escape(&option.label),
            escape(&option.attribute_code)
        );
        for value in &option.values {
            let _ = write!(
                body,
                r#"<option value="{}">{}</option>"#,
                escape(&value.uid),
                escape(&value.label)
            );
        }
        body.push_str("</select></label>");
    }
    body.push_str("</form>");

    // Cart availability is only known once the page is interactive.
    let _ = write!(
        body,
        r#"<div class="cart-action" data-sku="{}"><a class="sign-in" href="/login">Sign in to add to cart</a></div>"#,
        escape(&model.sku)
    );

    if let Some(note) = &model.stylist_note {
        let _ = write!(body, r#"<div class="stylist">{}</div>"#, escape(note));
    }
    // Product descriptions are authored HTML from the commerce backend.
    let _ = write!(
        body,
        r#"<div class="description">{}</div></section>"#,
        model.description_html
    );

    layout(&model.name, pages, &body)
}

pub(crate) fn not_found_page(pages: &[PageLink]) -> String {
    let error = ApiError::not_found();
    layout(
        "404",
        pages,
        &format!(
            r#"<section class="error"><h1>404</h1><p>{}</p></section>"#,
            escape(&error.message)
        ),
    )
}

pub(crate) fn error_page(error: &ApiError) -> String {
    layout(
        "Error",
        &[],
        &format!(
            r#"<section class="error"><h1>{}</h1><p>{}</p></section>"#,
            error.code.http_status(),
            escape(&error.message)
        ),
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn escapes_markup_in_cms_text() {
        assert_eq!(
            escape(r#"<b>"Tom" & 'Jerry'</b>"#),
            "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;"
        );
    }

    #[test]
    fn formats_known_and_unknown_currencies() {
        let usd = Price {
            value: 54.0,
            currency: "USD".into(),
        };
        let chf = Price {
            value: 12.5,
            currency: "CHF".into(),
        };
        assert_eq!(format_price(&usd), "$54.00");
        assert_eq!(format_price(&chf), "CHF 12.50");
    }
}
