//! Just enough HTML slicing to read the two pages we scrape. Blocks are found
//! by searching for the next closing tag, so they must not nest in themselves
//! (true for `table`, `tbody`, `tr`, `td`, `th` and `span` on those pages).

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Block<'a> {
    /// The opening tag, `<td ...>` inclusive.
    pub open: &'a str,
    pub inner: &'a str,
}

impl<'a> Block<'a> {
    pub fn attr(&self, name: &str) -> Option<&'a str> {
        attr(self.open, name)
    }

    pub fn has_class(&self, class: &str) -> bool {
        self.attr("class")
            .map_or(false, |v| v.split_whitespace().any(|c| c == class))
    }

    pub fn text(&self) -> String {
        text(self.inner)
    }
}

pub struct Blocks<'a> {
    html: &'a str,
    tag: &'a str,
    pos: usize,
}

impl<'a> Iterator for Blocks<'a> {
    type Item = Block<'a>;

    fn next(&mut self) -> Option<Block<'a>> {
        let start = find_open(self.html, self.tag, self.pos)?;
        let open_end = self.html[start..].find('>')? + start + 1;
        let close = format!("</{}", self.tag);
        let (inner_end, end) = match self.html[open_end..].find(&close) {
            Some(i) => {
                let inner_end = open_end + i;
                let end = self.html[inner_end..]
                    .find('>')
                    .map_or(self.html.len(), |j| inner_end + j + 1);
                (inner_end, end)
            }
            // unterminated: treat the rest of the document as the body
            None => (self.html.len(), self.html.len()),
        };
        self.pos = end;
        Some(Block {
            open: &self.html[start..open_end],
            inner: &self.html[open_end..inner_end],
        })
    }
}

/// Every `<tag ...>...</tag>` block in `html`, in document order.
pub fn blocks<'a>(html: &'a str, tag: &'a str) -> Blocks<'a> {
    Blocks { html, tag, pos: 0 }
}

pub fn find_by_attr<'a>(html: &'a str, tag: &'a str, name: &str, value: &str) -> Option<Block<'a>> {
    blocks(html, tag).find(|b| b.attr(name) == Some(value))
}

fn find_open(html: &str, tag: &str, from: usize) -> Option<usize> {
    let needle = format!("<{}", tag);
    let mut pos = from;
    loop {
        let i = html.get(pos..)?.find(&needle)? + pos;
        let after = i + needle.len();
        // `<tr` must not match `<track`
        match html[after..].chars().next() {
            Some(c) if c.is_ascii_whitespace() || c == '>' || c == '/' => return Some(i),
            None => return None,
            _ => pos = after,
        }
    }
}

/// Value of attribute `name` in an opening tag. Handles double-, single- and
/// unquoted values.
pub fn attr<'a>(open: &'a str, name: &str) -> Option<&'a str> {
    let mut rest = open;
    loop {
        let i = rest.find(name)?;
        let preceded = rest[..i]
            .chars()
            .next_back()
            .map_or(false, |c| c.is_ascii_whitespace());
        let after = rest[i + name.len()..].trim_start();
        if preceded && after.starts_with('=') {
            let value = after[1..].trim_start();
            return match value.chars().next()? {
                q @ '"' | q @ '\'' => {
                    let body = &value[1..];
                    body.find(q).map(|end| &body[..end])
                }
                _ => {
                    let end = value
                        .find(|c: char| c.is_ascii_whitespace() || c == '>')
                        .unwrap_or_else(|| value.len());
                    Some(&value[..end])
                }
            };
        }
        rest = &rest[i + name.len()..];
    }
}

/// Visible text of a fragment: tags dropped, common entities decoded,
/// whitespace collapsed.
pub fn text(fragment: &str) -> String {
    let mut out = String::with_capacity(fragment.len());
    let mut in_tag = false;
    for ch in fragment.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    let decoded = out
        .replace("&nbsp;", " ")
        .replace("&#160;", " ")
        .replace("&lt;", "<")
        .replace("&gt;", ">")
        .replace("&quot;", "\"")
        .replace("&#39;", "'")
        .replace("&amp;", "&");
    decoded.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Text before the first `<br>`, for cells that stack a value over a note.
pub fn first_line(fragment: &str) -> String {
    let end = fragment.find("<br").unwrap_or_else(|| fragment.len());
    text(&fragment[..end])
}
