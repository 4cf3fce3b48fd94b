//! Input sanitization applied to form fields before they are stored.
//!
//! Text fields go through [`clean_text`]: markup is stripped, the result is
//! trimmed and HTML-escaped. Email fields go through [`clean_email`].
//! Usernames go through [`clean_username`], which does not escape, so that the
//! stored value matches what the user types at login.

/// Elements whose content is dropped together with the tags.
const DROP_CONTENT: [&str; 2] = ["script", "style"];

/// Remove markup from `input`.
///
/// `<script>` and `<style>` elements are removed including their content,
/// every other tag is removed and its text kept. An unterminated `<` is kept
/// as text (it is escaped later).
pub fn strip_tags(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut rest = input;

    while let Some(start) = rest.find('<') {
        out.push_str(&rest[..start]);
        let tail = &rest[start..];
        let Some(end) = tail.find('>') else {
            out.push_str(tail);
            return out;
        };

        let tag = &tail[1..end];
        rest = &tail[end + 1..];

        if let Some(name) = opening_tag_name(tag)
            && DROP_CONTENT.contains(&name.as_str())
        {
            rest = skip_past_closing(rest, &name);
        }
    }
    out.push_str(rest);
    out
}

fn opening_tag_name(tag: &str) -> Option<String> {
    let name: String = tag
        .trim_start()
        .chars()
        .take_while(|c| c.is_ascii_alphanumeric())
        .collect();
    (!name.is_empty()).then(|| name.to_ascii_lowercase())
}

/// Returns the text after `</name ...>`, or the empty string if it never closes.
fn skip_past_closing<'a>(text: &'a str, name: &str) -> &'a str {
    let lower = text.to_ascii_lowercase();
    let needle = format!("</{name}");
    match lower.find(&needle) {
        Some(pos) => match text[pos..].find('>') {
            Some(end) => &text[pos + end + 1..],
            None => "",
        },
        None => "",
    }
}

/// Strip, trim and escape a free-text field.
pub fn clean_text(input: &str) -> String {
    let stripped = strip_tags(input);
    html_escape::encode_safe(stripped.trim()).into_owned()
}

/// Strip and trim a username. The result is stored as is and escaped on output.
pub fn clean_username(input: &str) -> String {
    strip_tags(input).trim().to_string()
}

/// Strip, trim and normalize an email address.
///
/// The address is lowercased. Gmail addresses additionally lose dots and any
/// `+tag` in the local part and `googlemail.com` becomes `gmail.com`. A value
/// without `@` is returned trimmed and lowercased.
pub fn clean_email(input: &str) -> String {
    let stripped = strip_tags(input);
    let email = stripped.trim().to_lowercase();

    let Some((local, domain)) = email.rsplit_once('@') else {
        return email;
    };

    if domain == "gmail.com" || domain == "googlemail.com" {
        let local = local.split('+').next().unwrap_or_default().replace('.', "");
        return format!("{local}@gmail.com");
    }
    format!("{local}@{domain}")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn script_elements_are_removed_with_content() {
        assert_eq!(strip_tags("Jon<script>alert('x')</script>"), "Jon");
        assert_eq!(strip_tags("a<SCRIPT type=\"x\">evil()</Script >b"), "ab");
        assert_eq!(strip_tags("<script>never closed"), "");
    }

    #[test]
    fn other_tags_keep_their_text() {
        assert_eq!(strip_tags("<b>bold</b> and <i>it</i>"), "bold and it");
        assert_eq!(strip_tags("<img src=x onerror=alert(1)>Jon"), "Jon");
    }

    #[test]
    fn lone_angle_bracket_is_text() {
        assert_eq!(strip_tags("1 < 2"), "1 < 2");
        assert_eq!(clean_text(" 1 < 2 "), "1 &lt; 2");
    }

    #[test]
    fn clean_text_escapes_and_trims() {
        assert_eq!(clean_text("  Jon  "), "Jon");
        assert_eq!(clean_text("Tom & \"Jerry\""), "Tom &amp; &quot;Jerry&quot;");
        assert_eq!(
            clean_text("<script>alert(1)</script>Jón"),
            "Jón"
        );
    }

    #[test]
    fn clean_username_strips_without_escaping() {
        assert_eq!(clean_username(" o'neil "), "o'neil");
        assert_eq!(clean_username("tom&jerry"), "tom&jerry");
        assert_eq!(clean_username("<b>jon</b><script>x</script>"), "jon");
    }

    #[test]
    fn clean_email_normalizes() {
        assert_eq!(clean_email(" Jon@Example.COM "), "jon@example.com");
        assert_eq!(clean_email("J.o.n+jobs@gmail.com"), "jon@gmail.com");
        assert_eq!(clean_email("jon@googlemail.com"), "jon@gmail.com");
        assert_eq!(clean_email("not-an-email"), "not-an-email");
    }
}
