use super::{field, loading_text, route_param, settled};
use crate::components::{DataTable, DetailHeader, FileUpload};
use crate::loader::load_on;
use crate::transport::Api;
use leptos::*;
use valentis_core::dto::{FilePreview, UploadResult, UploadStatus};
use valentis_core::fetch::FetchGeneration;
use valentis_core::routes::AppRoute;
use valentis_core::views::{files_loaded, upload_outcome, REQUIRED_FILES};
use wasm_bindgen_futures::spawn_local;
use web_sys::File;

fn upload_status(result: UploadResult) -> impl IntoView {
    let loaded = files_loaded(&result).map(|line| view! { <p class="upload-status__files">{line}</p> });
    let status = match result.status {
        UploadStatus::Success => "success",
        UploadStatus::Error => "error",
    };
    view! {
        <div class=format!("upload-status upload-status--{status}")>
            <h4>{result.heading()}</h4>
            <p>{result.message}</p>
            {loaded}
        </div>
    }
}

fn required_files() -> impl IntoView {
    let rows = REQUIRED_FILES
        .iter()
        .map(|file| {
            let href = AppRoute::FileView {
                filename: file.name.to_string(),
            }
            .to_path();
            let (badge, label) = if file.required {
                ("high", "Required")
            } else {
                ("low", "Optional")
            };
            view! {
                <tr>
                    <td>
                        <a class="clickable" href=href><strong>{file.name}</strong></a>
                    </td>
                    <td>
                        <span class=format!("risk-badge risk-badge--{badge}")>{label}</span>
                    </td>
                    <td>{file.description}</td>
                </tr>
            }
        })
        .collect_view();

    view! {
        <div class="card required-files">
            <h3>"Required Files"</h3>
            <div class="data-table-wrapper">
                <table class="data-table">
                    <thead>
                        <tr>
                            <th>"File"</th>
                            <th>"Status"</th>
                            <th>"Description"</th>
                        </tr>
                    </thead>
                    <tbody>{rows}</tbody>
                </table>
            </div>
        </div>
    }
}

#[component]
pub fn Upload() -> impl IntoView {
    let api = expect_context::<Api>();
    let uploading = create_rw_signal(false);
    let result = create_rw_signal(None::<UploadResult>);

    let generation = FetchGeneration::new();
    let on_unmount = generation.clone();
    on_cleanup(move || on_unmount.invalidate());

    let on_upload = Callback::new(move |files: Vec<File>| {
        let api = api.clone();
        let generation = generation.clone();
        let ticket = generation.begin();
        log::info!("uploading {} file(s)", files.len());
        uploading.set(true);
        result.set(None);
        spawn_local(async move {
            let outcome = upload_outcome(api.upload(files).await);
            let published = generation.settle(ticket, outcome, |outcome| {
                uploading.set(false);
                result.set(Some(outcome));
            });
            if !published {
                log::debug!("dropped upload response for a superseded submission");
            }
        });
    });

    view! {
        <div class="page page--upload">
            <FileUpload on_upload=on_upload uploading=uploading/>
            {move || result.get().map(upload_status)}
            {required_files()}
        </div>
    }
}

/// Raw preview of one ingested CSV, headings exactly as in the file.
#[component]
pub fn CsvViewer() -> impl IntoView {
    let api = expect_context::<Api>();
    let filename = route_param("filename");
    let state = load_on(
        filename,
        move |filename| {
            let api = api.clone();
            async move { api.file_preview(&filename).await }
        },
        "Failed to load file",
    );

    settled(
        state,
        loading_text(filename, |name| format!("Loading {name}...")),
        "/upload",
        "Back to Upload",
        |preview: FilePreview| {
            let columns: Vec<_> = preview.columns.iter().map(|name| field(name.clone(), name)).collect();
            view! {
                <div class="page page--csv-viewer">
                    <DetailHeader
                        back_href="/upload"
                        back_label="Back to Upload"
                        title=preview.filename.clone()
                        subtitle=format!("{} rows · {} columns", preview.total, preview.columns.len())
                    />
                    <div class="card">
                        <DataTable columns=columns rows=preview.rows/>
                    </div>
                </div>
            }
            .into_view()
        },
    )
}
