use leptos::ev::DragEvent;
use leptos::html;
use leptos::prelude::*;
use rembg::image::BatchOutcome;
use rembg::size::SizeType;

use super::files::file_list_to_vec;
use super::state::AppState;
use crate::ui_model::{drop_zone_class, ResultView, TierVisibility};

#[component]
pub(super) fn SingleUpload(state: AppState) -> impl IntoView {
    let file_input: NodeRef<html::Input> = NodeRef::new();
    let (drag_active, set_drag_active) = signal(false);

    let view_state = Memo::new(move |_| {
        ResultView::from_state(state.loading.get(), state.current.with(Option::is_some))
    });
    let tier = Memo::new(move |_| state.session.with(TierVisibility::for_session));

    let on_drag_over = move |ev: DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        set_drag_active.set(true);
    };
    let on_drag_leave = move |ev: DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        set_drag_active.set(false);
    };
    let on_drop = move |ev: DragEvent| {
        ev.prevent_default();
        ev.stop_propagation();
        set_drag_active.set(false);
        state.accept_drop(ev.data_transfer().and_then(|dt| dt.files()));
    };

    let image_src = move || {
        state
            .current
            .with(|c| c.as_ref().map(|c| c.image.data_url()).unwrap_or_default())
    };
    let dimensions = move || {
        state
            .current
            .with(|c| {
                c.as_ref()
                    .and_then(|c| c.image.dimensions_label())
                    .unwrap_or_default()
            })
    };

    view! {
        <section class="panel single-upload">
            <div
                id="drop-zone"
                class=move || drop_zone_class(drag_active.get())
                on:dragenter=on_drag_over
                on:dragover=on_drag_over
                on:dragleave=on_drag_leave
                on:drop=on_drop
                on:click=move |_| {
                    if let Some(input) = file_input.get() {
                        input.click();
                    }
                }
            >
                <p>"Drop an image here or click to choose one"</p>
            </div>
            <input
                id="file-input"
                type="file"
                accept="image/*"
                class="hidden"
                node_ref=file_input
                on:change=move |ev| {
                    let input: web_sys::HtmlInputElement = event_target(&ev);
                    if let Some(file) = file_list_to_vec(input.files()).into_iter().next() {
                        state.process_image(file);
                    }
                    // Picking the same file twice must fire `change` again.
                    input.set_value("");
                }
            />

            <div id="result-container" class="result">
                <Show when=move || view_state.get() == ResultView::Placeholder>
                    <p id="placeholder" class="placeholder">"Your result will appear here"</p>
                </Show>
                <Show when=move || view_state.get() == ResultView::Loading>
                    <div id="loading" class="loading">"Processing…"</div>
                </Show>
                <Show when=move || view_state.get() == ResultView::Image>
                    <img id="result-image" class="result-image" alt="Result" src=image_src />
                </Show>
            </div>

            <Show when=move || view_state.get().shows_downloads()>
                <div id="download-container" class="downloads">
                    <p id="image-dimensions" class="subtle">{dimensions}</p>
                    <Show
                        when=move || tier.get().member_downloads
                        fallback=move || {
                            view! {
                                <div id="guest-download" class="download-row">
                                    <button
                                        id="download-reduced-btn"
                                        class="btn"
                                        on:click=move |_| state.download_single(SizeType::Reduced)
                                    >
                                        "Download (reduced)"
                                    </button>
                                    <button
                                        id="download-full-btn"
                                        class="btn ghost"
                                        on:click=move |_| state.download_single(SizeType::Full)
                                    >
                                        "Download full size (log in)"
                                    </button>
                                </div>
                            }
                        }
                    >
                        <div id="user-download" class="download-row">
                            <button
                                id="download-full-btn-auth"
                                class="btn"
                                on:click=move |_| state.download_single(SizeType::Full)
                            >
                                "Download full size"
                            </button>
                            <button
                                id="download-reduced-btn-auth"
                                class="btn ghost"
                                on:click=move |_| state.download_single(SizeType::Reduced)
                            >
                                "Download reduced"
                            </button>
                        </div>
                    </Show>
                </div>
            </Show>
        </section>
    }
}

#[component]
pub(super) fn BatchUpload(state: AppState) -> impl IntoView {
    let tier = Memo::new(move |_| state.session.with(TierVisibility::for_session));

    view! {
        <section class="panel batch-upload">
            <h2>"Batch processing"</h2>
            <input
                id="batch-file-input"
                type="file"
                accept="image/*"
                multiple
                on:change=move |ev| {
                    let input: web_sys::HtmlInputElement = event_target(&ev);
                    state.select_batch(file_list_to_vec(input.files()));
                    input.set_value("");
                }
            />

            <Show when=move || state.batch_ready()>
                <div id="batch-preview" class="batch-preview">
                    <For
                        each=move || state.previews.get()
                        key=|p| p.id
                        children=move |p| {
                            let id = p.id;
                            view! {
                                <div class="batch-thumb">
                                    <img src=p.url alt=p.name.clone() title=p.name />
                                    <button
                                        class="batch-remove"
                                        title="Remove"
                                        on:click=move |_| state.remove_from_batch(id)
                                    >
                                        "×"
                                    </button>
                                </div>
                            }
                        }
                    />
                </div>
                <button
                    id="process-batch"
                    class="btn"
                    disabled=move || state.loading.get()
                    on:click=move |_| state.process_batch()
                >
                    "Process batch"
                </button>
            </Show>

            <Show when=move || state.batch_results.with(Option::is_some)>
                <div id="batch-results" class="batch-results">
                    <div class="download-row">
                        <Show
                            when=move || tier.get().member_downloads
                            fallback=move || {
                                view! {
                                    <div id="guest-batch-download">
                                        <button
                                            id="download-all-reduced"
                                            class="btn"
                                            on:click=move |_| state.download_all(SizeType::Reduced)
                                        >
                                            "Download all (reduced)"
                                        </button>
                                        <button
                                            id="download-all-full"
                                            class="btn ghost"
                                            on:click=move |_| state.download_all(SizeType::Full)
                                        >
                                            "Download all full size (log in)"
                                        </button>
                                    </div>
                                }
                            }
                        >
                            <div id="user-batch-download">
                                <button
                                    id="download-all-full-auth"
                                    class="btn"
                                    on:click=move |_| state.download_all(SizeType::Full)
                                >
                                    "Download all"
                                </button>
                                <button
                                    id="download-all-reduced-auth"
                                    class="btn ghost"
                                    on:click=move |_| state.download_all(SizeType::Reduced)
                                >
                                    "Download all (reduced)"
                                </button>
                            </div>
                        </Show>
                    </div>
                    <div id="batch-results-grid" class="batch-grid">
                        {move || {
                            state
                                .batch_results
                                .get()
                                .unwrap_or_default()
                                .into_iter()
                                .enumerate()
                                .map(|(idx, outcome)| view! { <ResultCard state=state idx=idx outcome=outcome /> })
                                .collect_view()
                        }}
                    </div>
                </div>
            </Show>
        </section>
    }
}

#[component]
fn ResultCard(state: AppState, idx: usize, outcome: BatchOutcome) -> impl IntoView {
    match outcome {
        BatchOutcome::Failed {
            original_name,
            error,
        } => view! {
            <div class="batch-card failed">
                <p class="batch-name">{original_name}</p>
                <p class="batch-error">{format!("Error: {error}")}</p>
            </div>
        }
        .into_any(),
        BatchOutcome::Processed {
            original_name,
            image,
        } => view! {
            <div class="batch-card">
                <img class="batch-result-img" src=image.data_url() alt=original_name.clone() />
                <div class="batch-meta">
                    <p class="batch-name" title=original_name.clone()>{original_name}</p>
                    <button
                        class="download-single-btn"
                        title="Download"
                        on:click=move |_| state.download_result(idx)
                    >
                        <i class="fas fa-download"></i>
                    </button>
                </div>
                <p class="subtle">{image.batch_caption()}</p>
            </div>
        }
        .into_any(),
    }
}
