//! What the screen should show for a given [`PresentationState`].

use slide_common::Slide;

use crate::controller::PresentationState;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum View<'a> {
    Loading,
    Error(&'a str),
    Welcome,
    Slide(SlideView<'a>),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlideView<'a> {
    pub slide: &'a Slide,
    /// 0-based.
    pub index: usize,
    pub total: usize,
}

impl SlideView<'_> {
    pub fn position_label(&self) -> String {
        format!("Slide {} of {}", self.index + 1, self.total)
    }

    pub fn can_prev(&self) -> bool {
        self.index > 0
    }

    pub fn can_next(&self) -> bool {
        self.index + 1 < self.total
    }
}

/// Exactly one view, in order of precedence: loading, error, welcome, slide.
pub fn view(state: &PresentationState) -> View<'_> {
    if state.is_loading {
        return View::Loading;
    }
    if let Some(error) = state.error.as_deref() {
        return View::Error(error);
    }
    match state.slides.get(state.current_slide_index) {
        Some(slide) => View::Slide(SlideView {
            slide,
            index: state.current_slide_index,
            total: state.slides.len(),
        }),
        None => View::Welcome,
    }
}

pub fn can_download(state: &PresentationState) -> bool {
    !state.slides.is_empty() && !state.is_loading
}

pub fn can_submit(state: &PresentationState, input: &str) -> bool {
    !state.is_loading && !input.trim().is_empty()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn loaded(n: usize) -> PresentationState {
        let mut state = PresentationState::default();
        state.slides = (0..n)
            .map(|i| Slide::new(format!("T{i}"), vec!["b".to_string()]))
            .collect();
        state
    }

    #[test]
    fn test_welcome_when_nothing_generated() {
        let state = PresentationState::default();
        assert_eq!(view(&state), View::Welcome);
        assert!(!can_download(&state));
    }

    #[test]
    fn test_loading_hides_everything_else() {
        let mut state = loaded(3);
        state.is_loading = true;
        state.error = Some("boom".into());
        assert_eq!(view(&state), View::Loading);
        assert!(!can_download(&state));
        assert!(!can_submit(&state, "topic"));
    }

    #[test]
    fn test_error_beats_slides() {
        let mut state = loaded(2);
        state.error = Some("boom".into());
        assert_eq!(view(&state), View::Error("boom"));
    }

    #[test]
    fn test_slide_view_position_and_controls() {
        let mut state = loaded(6);
        let View::Slide(first) = view(&state) else {
            panic!("expected slide view");
        };
        assert_eq!(first.position_label(), "Slide 1 of 6");
        assert!(!first.can_prev());
        assert!(first.can_next());

        state.current_slide_index = 5;
        let View::Slide(last) = view(&state) else {
            panic!("expected slide view");
        };
        assert_eq!(last.slide.title, "T5");
        assert!(last.can_prev());
        assert!(!last.can_next());
        assert!(can_download(&state));
    }

    #[test]
    fn test_submit_needs_non_blank_input() {
        let state = PresentationState::default();
        assert!(!can_submit(&state, "  "));
        assert!(can_submit(&state, "Volcanoes"));
    }
}
