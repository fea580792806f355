//! The analysis session as a pure state machine.
//!
//! `transition` never performs I/O; it returns the effects the caller has to
//! run and the events those effects produce are fed back in.

use crate::capture::camera::CameraError;
use crate::capture::selected::SelectedImage;
use crate::models::PredictionResponse;

#[derive(Debug, Clone, PartialEq, Default)]
pub enum State {
    #[default]
    Idle,
    ImageSelected {
        image: SelectedImage,
    },
    Analyzing {
        image: SelectedImage,
    },
    Result {
        image: SelectedImage,
        response: PredictionResponse,
    },
    Error {
        image: Option<SelectedImage>,
        message: String,
    },
}

#[derive(Debug)]
pub enum Event {
    /// A file was picked or a photo was captured.
    ImageChosen(SelectedImage),
    Submit,
    ClassifyDone(Result<PredictionResponse, String>),
    CameraFailed(CameraError),
}

#[derive(Debug, Clone, PartialEq)]
pub enum Effect {
    Classify { image: SelectedImage },
}

impl State {
    pub fn image(&self) -> Option<&SelectedImage> {
        match self {
            State::Idle => None,
            State::ImageSelected { image }
            | State::Analyzing { image }
            | State::Result { image, .. } => Some(image),
            State::Error { image, .. } => image.as_ref(),
        }
    }

    pub fn is_analyzing(&self) -> bool {
        matches!(self, State::Analyzing { .. })
    }

    pub fn response(&self) -> Option<&PredictionResponse> {
        match self {
            State::Result { response, .. } => Some(response),
            _ => None,
        }
    }

    pub fn error(&self) -> Option<&str> {
        match self {
            State::Error { message, .. } => Some(message),
            _ => None,
        }
    }

    fn into_image(self) -> Option<SelectedImage> {
        match self {
            State::Idle => None,
            State::ImageSelected { image }
            | State::Analyzing { image }
            | State::Result { image, .. } => Some(image),
            State::Error { image, .. } => image,
        }
    }
}

pub fn init() -> (State, Vec<Effect>) {
    (State::Idle, vec![])
}

pub fn transition(state: State, event: Event) -> (State, Vec<Effect>) {
    match (state, event) {
        // A new image always wins and drops any earlier result or error.
        (_, Event::ImageChosen(image)) => (State::ImageSelected { image }, vec![]),

        // Nothing to analyze, or a request is already in flight.
        (state, Event::Submit) if state.is_analyzing() || state.image().is_none() => {
            (state, vec![])
        }
        (state, Event::Submit) => match state.into_image() {
            Some(image) => (
                State::Analyzing {
                    image: image.clone(),
                },
                vec![Effect::Classify { image }],
            ),
            None => (State::Idle, vec![]),
        },

        (State::Analyzing { image }, Event::ClassifyDone(Ok(response))) => {
            (State::Result { image, response }, vec![])
        }
        (State::Analyzing { image }, Event::ClassifyDone(Err(message))) => (
            State::Error {
                image: Some(image),
                message,
            },
            vec![],
        ),
        // A completion that arrives outside of Analyzing is stale.
        (state, Event::ClassifyDone(_)) => (state, vec![]),

        (state, Event::CameraFailed(err)) => (
            State::Error {
                image: state.into_image(),
                message: err.to_string(),
            },
            vec![],
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ClassificationResult, Severity};
    use bytes::Bytes;

    fn image(name: &str) -> SelectedImage {
        SelectedImage {
            file_name: name.to_string(),
            content_type: "image/jpeg".to_string(),
            data: Bytes::from_static(&[0xFF, 0xD8, 0xFF, 0xD9]),
        }
    }

    fn response() -> PredictionResponse {
        PredictionResponse::from_backend(ClassificationResult {
            disease: "Pepper Bell Bacterial Spot".into(),
            confidence: 91.0,
            severity: Severity::Medium,
            description: None,
            treatment: None,
            color: "orange".into(),
            predicted_class: None,
            class_index: None,
        })
    }

    #[test]
    fn test_init() {
        let (state, effects) = init();
        assert_eq!(state, State::Idle);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_submit_in_idle_does_nothing() {
        let (state, effects) = transition(State::Idle, Event::Submit);
        assert_eq!(state, State::Idle);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_happy_path() {
        let (state, effects) = transition(State::Idle, Event::ImageChosen(image("a.jpg")));
        assert_eq!(
            state,
            State::ImageSelected {
                image: image("a.jpg")
            }
        );
        assert!(effects.is_empty());

        let (state, effects) = transition(state, Event::Submit);
        assert!(state.is_analyzing());
        assert_eq!(
            effects,
            vec![Effect::Classify {
                image: image("a.jpg")
            }]
        );

        let (state, effects) = transition(state, Event::ClassifyDone(Ok(response())));
        assert_eq!(state.response(), Some(&response()));
        assert_eq!(state.image(), Some(&image("a.jpg")));
        assert!(effects.is_empty());
    }

    #[test]
    fn test_failure_keeps_image() {
        let analyzing = State::Analyzing {
            image: image("a.jpg"),
        };
        let (state, _) = transition(analyzing, Event::ClassifyDone(Err("API Error: 500".into())));
        assert_eq!(state.error(), Some("API Error: 500"));
        assert_eq!(state.image(), Some(&image("a.jpg")));
    }

    #[test]
    fn test_second_submit_while_analyzing_is_ignored() {
        let analyzing = State::Analyzing {
            image: image("a.jpg"),
        };
        let (state, effects) = transition(analyzing.clone(), Event::Submit);
        assert_eq!(state, analyzing);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_new_image_clears_result_and_error() {
        let with_result = State::Result {
            image: image("a.jpg"),
            response: response(),
        };
        let (state, _) = transition(with_result, Event::ImageChosen(image("b.jpg")));
        assert_eq!(state.response(), None);
        assert_eq!(state.error(), None);
        assert_eq!(state.image(), Some(&image("b.jpg")));

        let with_error = State::Error {
            image: None,
            message: "No camera found on this device.".into(),
        };
        let (state, _) = transition(with_error, Event::ImageChosen(image("c.jpg")));
        assert_eq!(
            state,
            State::ImageSelected {
                image: image("c.jpg")
            }
        );
    }

    #[test]
    fn test_resubmit_after_result() {
        let with_result = State::Result {
            image: image("a.jpg"),
            response: response(),
        };
        let (state, effects) = transition(with_result, Event::Submit);
        assert!(state.is_analyzing());
        assert_eq!(state.response(), None);
        assert_eq!(effects.len(), 1);
    }

    #[test]
    fn test_submit_after_camera_error_without_image() {
        let failed = State::Error {
            image: None,
            message: "Camera not supported in this browser.".into(),
        };
        let (state, effects) = transition(failed.clone(), Event::Submit);
        assert_eq!(state, failed);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_stale_completion_is_ignored() {
        let selected = State::ImageSelected {
            image: image("b.jpg"),
        };
        let (state, effects) = transition(selected.clone(), Event::ClassifyDone(Ok(response())));
        assert_eq!(state, selected);
        assert!(effects.is_empty());
    }

    #[test]
    fn test_camera_failure_keeps_current_image() {
        let selected = State::ImageSelected {
            image: image("a.jpg"),
        };
        let (state, _) = transition(selected, Event::CameraFailed(CameraError::InUse));
        assert_eq!(
            state.error(),
            Some("Camera is already in use by another application.")
        );
        assert_eq!(state.image(), Some(&image("a.jpg")));
    }
}
