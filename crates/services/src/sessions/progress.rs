use serde::Serialize;

/// Everything a front end needs to render the current session state.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct SessionProgress {
    pub position: usize,
    pub total: usize,
    pub score: u32,
    pub answered: bool,
    pub is_complete: bool,
}

impl SessionProgress {
    /// `position / total`, in `[0, 1]`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn fraction(&self) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.position as f64 / self.total as f64
    }

    /// Progress as a whole percentage, rounded half up.
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn percent(&self) -> u8 {
        (self.fraction() * 100.0).round().clamp(0.0, 100.0) as u8
    }

    /// Questions that have received an answer, including a locked current one.
    #[must_use]
    pub fn answered_count(&self) -> usize {
        self.position + usize::from(self.answered)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn progress(position: usize, total: usize) -> SessionProgress {
        SessionProgress {
            position,
            total,
            score: 0,
            answered: false,
            is_complete: position == total,
        }
    }

    #[test]
    fn fraction_and_percent() {
        assert_eq!(progress(0, 5).percent(), 0);
        assert_eq!(progress(1, 3).percent(), 33);
        assert_eq!(progress(2, 3).percent(), 67);
        assert_eq!(progress(5, 5).percent(), 100);
        assert!((progress(1, 4).fraction() - 0.25).abs() < f64::EPSILON);
    }

    #[test]
    fn counts() {
        let mut p = progress(2, 5);
        assert_eq!(p.answered_count(), 2);
        p.answered = true;
        assert_eq!(p.answered_count(), 3);
    }

    #[test]
    fn serializes_for_renderers() {
        let json = serde_json::to_value(progress(1, 2)).unwrap();
        assert_eq!(json["position"], 1);
        assert_eq!(json["total"], 2);
        assert_eq!(json["is_complete"], false);
    }
}
