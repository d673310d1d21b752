//! Resolves a download button click into the action the page must take.

use crate::image::{batch_download_name, single_download_name, BatchOutcome, CurrentImage};
use crate::session::Session;
use crate::size::SizeType;

/// Outcome of a single-image download button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SingleDownload<F> {
    /// Full size needs an account: open the login modal instead.
    PromptLogin,
    /// The shown image is too small; process `source` again at `size`.
    Reprocess { source: F, size: SizeType },
    /// Save the shown image under `name`.
    Save { name: String },
}

/// Outcome of a "download all" button.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BatchDownload {
    PromptLogin,
    /// `(file name, index into the batch results)` pairs.
    Save(Vec<(String, usize)>),
}

/// Plan for the single-image download buttons. `None` when nothing has been processed yet.
pub fn plan_single_download<F: Clone>(
    session: &Session,
    current: Option<&CurrentImage<F>>,
    requested: SizeType,
) -> Option<SingleDownload<F>> {
    let current = current?;
    if requested == SizeType::Full {
        if !session.is_signed_in() {
            return Some(SingleDownload::PromptLogin);
        }
        if current.image.size_type == SizeType::Reduced {
            return Some(SingleDownload::Reprocess {
                source: current.source.clone(),
                size: SizeType::Full,
            });
        }
    }
    Some(SingleDownload::Save {
        name: single_download_name(requested),
    })
}

/// Plan for the "download all" buttons. Failed results are skipped and do not
/// consume a number in the generated file names.
pub fn plan_batch_download(
    session: &Session,
    outcomes: &[BatchOutcome],
    requested: SizeType,
) -> BatchDownload {
    if requested == SizeType::Full && !session.is_signed_in() {
        return BatchDownload::PromptLogin;
    }
    let files = outcomes
        .iter()
        .enumerate()
        .filter(|(_, o)| o.image().is_some())
        .enumerate()
        .map(|(n, (idx, _))| (batch_download_name(n, requested), idx))
        .collect();
    BatchDownload::Save(files)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::{AuthUser, UserRecord};
    use crate::image::ProcessedImage;

    fn member() -> Session {
        Session::SignedIn(AuthUser {
            token: Some("tok".to_string()),
            record: UserRecord::default(),
        })
    }

    fn image(size: SizeType) -> ProcessedImage {
        ProcessedImage {
            base64: "AAAA".to_string(),
            size_type: size,
            width: None,
            height: None,
        }
    }

    fn shown(size: SizeType, source: &'static str) -> CurrentImage<&'static str> {
        CurrentImage {
            image: image(size),
            source,
        }
    }

    #[test]
    fn nothing_to_download_without_an_image() {
        assert_eq!(
            plan_single_download::<&str>(&Session::Guest, None, SizeType::Reduced),
            None
        );
    }

    #[test]
    fn guest_full_download_prompts_login() {
        let cur = shown(SizeType::Reduced, "a.png");
        assert_eq!(
            plan_single_download(&Session::Guest, Some(&cur), SizeType::Full),
            Some(SingleDownload::PromptLogin)
        );
    }

    #[test]
    fn guest_reduced_download_saves() {
        let cur = shown(SizeType::Reduced, "a.png");
        assert_eq!(
            plan_single_download(&Session::Guest, Some(&cur), SizeType::Reduced),
            Some(SingleDownload::Save {
                name: "rembg-output-reduced.png".to_string()
            })
        );
    }

    #[test]
    fn member_full_over_reduced_reprocesses_the_shown_source() {
        let cur = shown(SizeType::Reduced, "a.png");
        assert_eq!(
            plan_single_download(&member(), Some(&cur), SizeType::Full),
            Some(SingleDownload::Reprocess {
                source: "a.png",
                size: SizeType::Full
            })
        );
    }

    #[test]
    fn out_of_order_replies_keep_image_and_source_together() {
        // "b" was uploaded last, but the reply for "a" landed last and is on screen.
        let mut current = None;
        for reply in [shown(SizeType::Reduced, "b.png"), shown(SizeType::Reduced, "a.png")] {
            current = Some(reply);
        }
        assert!(matches!(
            plan_single_download(&member(), current.as_ref(), SizeType::Full),
            Some(SingleDownload::Reprocess { source: "a.png", .. })
        ));
    }

    #[test]
    fn member_full_over_full_saves() {
        let cur = shown(SizeType::Full, "a.png");
        assert_eq!(
            plan_single_download(&member(), Some(&cur), SizeType::Full),
            Some(SingleDownload::Save {
                name: "rembg-output-full.png".to_string()
            })
        );
    }

    #[test]
    fn member_reduced_request_saves_current() {
        let cur = shown(SizeType::Full, "a.png");
        assert!(matches!(
            plan_single_download(&member(), Some(&cur), SizeType::Reduced),
            Some(SingleDownload::Save { .. })
        ));
    }

    fn outcomes() -> Vec<BatchOutcome> {
        vec![
            BatchOutcome::Processed {
                original_name: "a.png".to_string(),
                image: image(SizeType::Reduced),
            },
            BatchOutcome::Failed {
                original_name: "b.png".to_string(),
                error: "bad".to_string(),
            },
            BatchOutcome::Processed {
                original_name: "c.png".to_string(),
                image: image(SizeType::Reduced),
            },
        ]
    }

    #[test]
    fn batch_download_numbers_successes_only() {
        let plan = plan_batch_download(&Session::Guest, &outcomes(), SizeType::Reduced);
        assert_eq!(
            plan,
            BatchDownload::Save(vec![
                ("rembg-output-1-reduced.png".to_string(), 0),
                ("rembg-output-2-reduced.png".to_string(), 2),
            ])
        );
    }

    #[test]
    fn batch_full_requires_login() {
        assert_eq!(
            plan_batch_download(&Session::Guest, &outcomes(), SizeType::Full),
            BatchDownload::PromptLogin
        );
        assert!(matches!(
            plan_batch_download(&member(), &outcomes(), SizeType::Full),
            BatchDownload::Save(ref v) if v.len() == 2
        ));
    }
}
