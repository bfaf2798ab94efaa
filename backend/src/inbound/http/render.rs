//! Server-rendered HTML for the landing page, the marketplace and sign-in.
//!
//! Every value that originates from users or the store passes through
//! [`escape`] before it reaches the markup.


use crate::domain::{
    CreateListingForm, ListingError, ListingField, MarketplaceView, SessionState, TableRow,
};

/// Headline shown on the landing page.
pub const HEADLINE: &str = "Empowering Communities, One Watt at a Time.";
/// Marketplace navigation label.
pub const MARKETPLACE_LINK: &str = "Energy Marketplace";
/// Copyright notice in the footer.
pub const COPYRIGHT: &str = "© 2025 Load Shedding Community Power Hub. All rights reserved.";

const INTRO: &str = "Access real-time load shedding schedules, share surplus energy with \
neighbors, and explore cost-effective solar solutions from a single, user-friendly platform. \
Whether you're looking to stay informed, reduce reliance on the grid, or contribute to a \
smarter, more connected energy network, we give you the tools to take control. Join a \
community that's powering the future, together.";

const MISSION: &str = "Our mission is to empower communities by providing real-time load \
shedding tracking, energy sharing, and access to sustainable power solutions.";

const TABLE_HEADERS: [&str; 5] = [
    "Seller",
    "Energy (kWh)",
    "Price per kWh",
    "Total Price",
    "Location",
];

const STYLE: &str = "body{margin:0;font-family:sans-serif;background:#030637;color:#fff}\
nav{display:flex;justify-content:space-between;align-items:center;padding:1rem 2rem}\
a{color:#fff}main{padding:2rem 4vw;min-height:70vh}\
.button{background:#910A67;border:none;border-radius:5px;color:#fff;padding:.5rem 1rem;\
text-decoration:none;font-weight:600;cursor:pointer}\
table{width:100%;border-collapse:collapse}th{background:#3C0753}\
td,th{border:1px solid #ccc;padding:.5rem}\
.modal{position:fixed;inset:0;background:rgba(0,0,0,.6);display:flex;\
align-items:center;justify-content:center}\
.modal form{background:#3C0753;padding:2rem;border-radius:10px;display:grid;gap:.5rem}\
.error{background:#720455;padding:.5rem;border-radius:5px}\
footer{padding:1.5rem;text-align:center}";

/// Escape text for inclusion in HTML element content or quoted attributes.
///
/// # Examples
/// ```
/// use powerhub::inbound::http::render::escape;
///
/// assert_eq!(escape(r#"<b>"Tom" & 'Jerry'</b>"#),
///     "&lt;b&gt;&quot;Tom&quot; &amp; &#39;Jerry&#39;&lt;/b&gt;");
/// ```
pub fn escape(raw: &str) -> String {
    let mut escaped = String::with_capacity(raw.len());
    for ch in raw.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&#39;"),
            other => escaped.push(other),
        }
    }
    escaped
}

fn navbar(session: &SessionState) -> String {
    let control = match session {
        SessionState::SignedIn { attributes } => format!(
            r#"<span>{name}</span>
<form method="post" action="/logout"><button class="button" type="submit">Sign Out</button></form>"#,
            name = escape(attributes.display_name()),
        ),
        SessionState::SignedOut => r#"<a class="button" href="/login">Log In</a>"#.to_owned(),
    };
    format!(
        r#"<nav>
<a href="/" aria-label="Home">&#9889;</a>
<a href="/marketplace">{MARKETPLACE_LINK}</a>
<div>{control}</div>
</nav>"#
    )
}

fn footer() -> String {
    format!(
        r#"<footer>
<h3>Mission</h3>
<p>{MISSION}</p>
<small>{COPYRIGHT}</small>
</footer>"#
    )
}

fn layout(title: &str, session: &SessionState, main: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="UTF-8">
<meta name="viewport" content="width=device-width, initial-scale=1.0">
<title>{title} | Community Power Hub</title>
<style>{STYLE}</style>
</head>
<body>
{nav}
<main>
{main}
</main>
{footer}
</body>
</html>"#,
        title = escape(title),
        nav = navbar(session),
        footer = footer(),
    )
}

/// Landing page.
pub fn landing_page(session: &SessionState) -> String {
    let main = format!(
        r#"<h1>{HEADLINE}</h1>
<p>{intro}</p>
<p><a class="button" href="/marketplace">Get Started</a></p>"#,
        intro = escape(INTRO),
    );
    layout("Home", session, &main)
}

/// Sign-in page accepting an access token issued by the identity service.
pub fn login_page(error: Option<&str>) -> String {
    let notice = error
        .map(|message| format!(r#"<p class="error" role="alert">{}</p>"#, escape(message)))
        .unwrap_or_default();
    let main = format!(
        r#"<h1>Log In</h1>
{notice}
<form method="post" action="/login">
<label for="accessToken">Access token:</label>
<input id="accessToken" name="accessToken" required>
<button class="button" type="submit">Log In</button>
</form>"#
    );
    layout("Log In", &SessionState::SignedOut, &main)
}

fn table(view: &MarketplaceView) -> String {
    let headers: String = TABLE_HEADERS
        .iter()
        .map(|header| format!("<th>{header}</th>"))
        .collect();
    let rows: String = view
        .table()
        .into_iter()
        .map(|row| match row {
            TableRow::Listing(row) => format!(
                "<tr><td>{}</td><td>{}</td><td>{}</td><td>{}</td><td>{}</td></tr>\n",
                escape(&row.seller_name),
                escape(&row.energy),
                escape(&row.price_per_kwh),
                escape(&row.total_price),
                escape(&row.location),
            ),
            TableRow::Placeholder(text) => format!(
                "<tr><td colspan=\"{}\">{}</td></tr>\n",
                TABLE_HEADERS.len(),
                escape(text),
            ),
        })
        .collect();
    format!("<table>\n<thead><tr>{headers}</tr></thead>\n<tbody>\n{rows}</tbody>\n</table>")
}

fn pager(view: &MarketplaceView) -> String {
    let paginator = view.paginator();
    let page = view.page();
    let previous = if paginator.has_previous(page) {
        format!(
            r#"<a class="button" href="/marketplace?page={}">Previous</a>"#,
            paginator.previous(page)
        )
    } else {
        r#"<span class="button" aria-disabled="true">Previous</span>"#.to_owned()
    };
    let next = if paginator.has_next(page) {
        format!(
            r#"<a class="button" href="/marketplace?page={}">Next</a>"#,
            paginator.next(page)
        )
    } else {
        r#"<span class="button" aria-disabled="true">Next</span>"#.to_owned()
    };
    format!(
        r#"<p class="pager">{previous} <span>Page {page} of {total}</span> {next}</p>"#,
        total = view.total_pages(),
    )
}

fn error_notice(error: &ListingError) -> String {
    let message = match error {
        ListingError::Validation(invalid) => invalid.to_string(),
        ListingError::Create(_) => "The listing could not be saved. Please try again.".to_owned(),
        ListingError::Fetch(_) => "Listings could not be loaded.".to_owned(),
    };
    format!(r#"<p class="error" role="alert">{}</p>"#, escape(&message))
}

fn modal(form: &CreateListingForm, page: impl std::fmt::Display) -> String {
    let Some(fields) = form.fields() else {
        return String::new();
    };
    let inputs: String = ListingField::ALL
        .into_iter()
        .map(|field| {
            let kind = match field {
                ListingField::Energy | ListingField::PricePerKwh => "number",
                _ => "text",
            };
            format!(
                r#"<label for="{name}">{label}:</label>
<input id="{name}" name="{name}" type="{kind}" step="any" value="{value}" required>
"#,
                name = field.as_str(),
                label = field.label(),
                value = escape(fields.get(field)),
            )
        })
        .collect();
    let notice = form.error().map(error_notice).unwrap_or_default();
    format!(
        r#"<div class="modal" role="dialog" aria-labelledby="add-listing-title">
<form method="post" action="/marketplace/listings">
<h2 id="add-listing-title">Add a New Listing</h2>
{notice}
{inputs}<button class="button" type="submit">Submit Listing</button>
<a class="button" href="/marketplace?page={page}">Cancel</a>
</form>
</div>"#
    )
}

/// Marketplace page: listing table, pager and, when open, the add-listing
/// modal.
pub fn marketplace_page(view: &MarketplaceView, session: &SessionState) -> String {
    let page = view.page();
    let main = format!(
        r#"<h1>{MARKETPLACE_LINK}</h1>
<p><a class="button" href="/marketplace?page={page}&amp;form=open">Add Listing</a></p>
{table}
{pager}
{modal}"#,
        table = table(view),
        pager = pager(view),
        modal = modal(view.form(), page),
    );
    layout(MARKETPLACE_LINK, session, &main)
}
