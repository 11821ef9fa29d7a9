// Copyright 2025 the Perch Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Stock components: a growable text input and a fixed-height panel.

use alloc::string::String;

use perch_height::{Component, InputHandle};

/// A growable text input, the usual message composer.
///
/// The bar grows one line at a time: with `rows` lines of text the content
/// height is `rows * line_height + (minimum_height - line_height)`, never less
/// than `minimum_height`. Empty text always wants the minimum.
///
/// The host measures wrapped rows with its text layout and reports them with
/// [`set_measured_rows`](Self::set_measured_rows); without a measurement the
/// row count is the number of hard line breaks plus one.
///
/// ```
/// use perch_bar::TextInput;
/// use perch_height::Component;
///
/// let mut input = TextInput::new(20.0);
/// assert_eq!(input.content_height(), 44.0);
///
/// input.set_text("one\ntwo\nthree");
/// assert_eq!(input.rows(), 3);
/// assert_eq!(input.content_height(), 84.0);
/// assert!(input.is_send_enabled());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct TextInput {
    text: String,
    line_height: f64,
    minimum_height: f64,
    measured_rows: Option<usize>,
    focused: bool,
    animating_to: Option<f64>,
    layout_height: Option<f64>,
}

impl TextInput {
    /// Default height of an empty input.
    pub const DEFAULT_MINIMUM_HEIGHT: f64 = 44.0;

    /// Creates an empty input with the given line height.
    #[must_use]
    pub fn new(line_height: f64) -> Self {
        Self {
            text: String::new(),
            line_height,
            minimum_height: Self::DEFAULT_MINIMUM_HEIGHT,
            measured_rows: None,
            focused: false,
            animating_to: None,
            layout_height: None,
        }
    }

    /// Returns a copy with the given minimum height.
    #[must_use]
    pub fn with_minimum_height(mut self, minimum_height: f64) -> Self {
        self.minimum_height = minimum_height;
        self
    }

    /// Current text.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replaces the text and drops any previous row measurement.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
        self.measured_rows = None;
    }

    /// Records the number of laid out rows, wrapping included.
    pub fn set_measured_rows(&mut self, rows: usize) {
        self.measured_rows = Some(rows);
    }

    /// Number of rows the text occupies.
    #[must_use]
    pub fn rows(&self) -> usize {
        if self.text.is_empty() {
            return 0;
        }
        self.measured_rows
            .unwrap_or_else(|| self.text.split('\n').count())
    }

    /// Height of one line of text.
    #[must_use]
    pub fn line_height(&self) -> f64 {
        self.line_height
    }

    /// Changes the line height, for instance after a font change.
    pub fn set_line_height(&mut self, line_height: f64) {
        self.line_height = line_height;
    }

    /// Height of the input with no text.
    #[must_use]
    pub fn minimum_height(&self) -> f64 {
        self.minimum_height
    }

    /// Changes the height of the input with no text.
    pub fn set_minimum_height(&mut self, minimum_height: f64) {
        self.minimum_height = minimum_height;
    }

    /// Whether a send action makes sense: the text is not empty.
    #[must_use]
    pub fn is_send_enabled(&self) -> bool {
        !self.text.is_empty()
    }

    /// Takes the text out for sending, leaving the input empty.
    pub fn take_text(&mut self) -> String {
        self.measured_rows = None;
        core::mem::take(&mut self.text)
    }

    /// Height the input is animating to, between the two phases of a change.
    #[must_use]
    pub fn animating_to(&self) -> Option<f64> {
        self.animating_to
    }

    /// Height the input was last laid out at once a change settled.
    #[must_use]
    pub fn layout_height(&self) -> Option<f64> {
        self.layout_height
    }
}

impl InputHandle for TextInput {
    fn is_focused(&self) -> bool {
        self.focused
    }

    fn focus(&mut self, animated: bool) {
        log::trace!("text input focused (animated: {animated})");
        self.focused = true;
    }

    fn resign(&mut self) {
        self.focused = false;
    }
}

impl Component for TextInput {
    fn content_height(&self) -> f64 {
        let rows = self.rows();
        if rows == 0 {
            return self.minimum_height;
        }
        let padding = self.minimum_height - self.line_height;
        (rows as f64 * self.line_height + padding).max(self.minimum_height)
    }

    fn focusable_input(&self) -> Option<&dyn InputHandle> {
        Some(self)
    }

    fn focusable_input_mut(&mut self) -> Option<&mut dyn InputHandle> {
        Some(self)
    }

    fn on_animated_layout(&mut self, new_height: f64) {
        // Keeps the last line pinned while the container grows.
        self.animating_to = Some(new_height);
    }

    fn on_post_animation_layout(&mut self, new_height: f64) {
        self.animating_to = None;
        self.layout_height = Some(new_height);
    }
}

/// A fixed-height auxiliary panel, such as a photo picker.
///
/// Panels take no keyboard focus.
#[derive(Clone, Debug, PartialEq)]
pub struct Panel {
    height: f64,
}

impl Panel {
    /// Creates a panel that wants `height`.
    #[must_use]
    pub fn new(height: f64) -> Self {
        Self {
            height: height.max(0.0),
        }
    }

    /// Changes the wanted height.
    pub fn set_height(&mut self, height: f64) {
        self.height = height.max(0.0);
    }
}

impl Component for Panel {
    fn content_height(&self) -> f64 {
        self.height
    }

    fn focusable_input(&self) -> Option<&dyn InputHandle> {
        None
    }

    fn focusable_input_mut(&mut self) -> Option<&mut dyn InputHandle> {
        None
    }

    fn on_animated_layout(&mut self, _new_height: f64) {}

    fn on_post_animation_layout(&mut self, _new_height: f64) {}
}

/// The stock components as one closed type.
#[derive(Clone, Debug, PartialEq)]
pub enum StandardComponent {
    /// A growable text input.
    Text(TextInput),
    /// A fixed-height panel.
    Panel(Panel),
}

impl StandardComponent {
    /// The text input, if this is one.
    #[must_use]
    pub fn as_text(&self) -> Option<&TextInput> {
        match self {
            Self::Text(input) => Some(input),
            Self::Panel(_) => None,
        }
    }

    /// Mutable access to the text input, if this is one.
    pub fn as_text_mut(&mut self) -> Option<&mut TextInput> {
        match self {
            Self::Text(input) => Some(input),
            Self::Panel(_) => None,
        }
    }

    fn inner(&self) -> &dyn Component {
        match self {
            Self::Text(input) => input,
            Self::Panel(panel) => panel,
        }
    }

    fn inner_mut(&mut self) -> &mut dyn Component {
        match self {
            Self::Text(input) => input,
            Self::Panel(panel) => panel,
        }
    }
}

impl From<TextInput> for StandardComponent {
    fn from(input: TextInput) -> Self {
        Self::Text(input)
    }
}

impl From<Panel> for StandardComponent {
    fn from(panel: Panel) -> Self {
        Self::Panel(panel)
    }
}

impl Component for StandardComponent {
    fn content_height(&self) -> f64 {
        self.inner().content_height()
    }

    fn focusable_input(&self) -> Option<&dyn InputHandle> {
        self.inner().focusable_input()
    }

    fn focusable_input_mut(&mut self) -> Option<&mut dyn InputHandle> {
        self.inner_mut().focusable_input_mut()
    }

    fn on_animated_layout(&mut self, new_height: f64) {
        self.inner_mut().on_animated_layout(new_height);
    }

    fn on_post_animation_layout(&mut self, new_height: f64) {
        self.inner_mut().on_post_animation_layout(new_height);
    }
}
