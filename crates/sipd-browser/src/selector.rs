use std::borrow::Cow;
use std::fmt;

/// Declarative description of one page element.
///
/// A target is a CSS scope, optionally narrowed to matches whose rendered
/// text contains `text`, indexed when the portal repeats the same markup
/// (`index` picks among matches, first by default), optionally descending
/// to a `child` selector under the matched container. The portal selector
/// table builds these as constants; dynamic values (month names, SKPD
/// names) come in through the owning `Cow` side.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Target {
    pub css: Cow<'static, str>,
    pub text: Option<Cow<'static, str>>,
    pub index: usize,
    pub child: Option<Cow<'static, str>>,
    pub child_index: usize,
}

impl Target {
    /// Plain CSS target, first match wins.
    pub const fn css(css: &'static str) -> Self {
        Self {
            css: Cow::Borrowed(css),
            text: None,
            index: 0,
            child: None,
            child_index: 0,
        }
    }

    /// The `index`-th match of `css` (0-based).
    pub const fn nth(css: &'static str, index: usize) -> Self {
        Self {
            css: Cow::Borrowed(css),
            text: None,
            index,
            child: None,
            child_index: 0,
        }
    }

    /// First match of `css` whose rendered text contains `text`.
    pub const fn text(css: &'static str, text: &'static str) -> Self {
        Self {
            css: Cow::Borrowed(css),
            text: Some(Cow::Borrowed(text)),
            index: 0,
            child: None,
            child_index: 0,
        }
    }

    /// A labelled container and the element inside it, for form fields the
    /// portal only identifies by their fieldset caption.
    pub const fn labelled(css: &'static str, text: &'static str, child: &'static str) -> Self {
        Self {
            css: Cow::Borrowed(css),
            text: Some(Cow::Borrowed(text)),
            index: 0,
            child: Some(Cow::Borrowed(child)),
            child_index: 0,
        }
    }

    /// Text-narrowed target with a runtime value (month name, SKPD name).
    pub fn containing(css: &'static str, text: impl Into<String>) -> Self {
        Self {
            css: Cow::Borrowed(css),
            text: Some(Cow::Owned(text.into())),
            index: 0,
            child: None,
            child_index: 0,
        }
    }

    /// Descend to the first `child` match under the container.
    pub fn child(self, child: &'static str) -> Self {
        self.child_nth(child, 0)
    }

    /// Descend to the `index`-th `child` match under the container.
    pub fn child_nth(mut self, child: &'static str, index: usize) -> Self {
        self.child = Some(Cow::Borrowed(child));
        self.child_index = index;
        self
    }
}

impl fmt::Display for Target {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.css)?;
        if let Some(text) = &self.text {
            write!(f, " containing {:?}", text)?;
        }
        if self.index > 0 {
            write!(f, " [{}]", self.index)?;
        }
        if let Some(child) = &self.child {
            write!(f, " then {}", child)?;
            if self.child_index > 0 {
                write!(f, " [{}]", self.child_index)?;
            }
        }
        Ok(())
    }
}
