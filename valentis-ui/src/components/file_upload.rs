use leptos::html::Input;
use leptos::*;
use web_sys::{File, FileList};

fn files_of(list: Option<FileList>) -> Vec<File> {
    let Some(list) = list else {
        return Vec::new();
    };
    (0..list.length()).filter_map(|i| list.get(i)).collect()
}

/// Drop zone plus hidden picker. Hands whatever was chosen to `on_upload`
/// untouched; empty selections are ignored.
#[component]
pub fn FileUpload(
    on_upload: Callback<Vec<File>>,
    #[prop(into)] uploading: Signal<bool>,
) -> impl IntoView {
    let input_ref = create_node_ref::<Input>();
    let drag_over = create_rw_signal(false);

    let forward = move |files: Vec<File>| {
        if !files.is_empty() {
            on_upload.call(files);
        }
    };

    let on_drop = move |ev: ev::DragEvent| {
        ev.prevent_default();
        drag_over.set(false);
        forward(files_of(ev.data_transfer().and_then(|dt| dt.files())));
    };
    let on_change = move |_| {
        if let Some(input) = input_ref.get() {
            forward(files_of(input.files()));
            input.set_value("");
        }
    };
    let open_picker = move |_| {
        if let Some(input) = input_ref.get() {
            input.click();
        }
    };

    view! {
        <div
            class={move || if drag_over.get() { "file-upload file-upload--dragover" } else { "file-upload" }}
            on:dragover=move |ev: ev::DragEvent| {
                ev.prevent_default();
                drag_over.set(true);
            }
            on:dragleave=move |_| drag_over.set(false)
            on:drop=on_drop
            on:click=open_picker
        >
            <div class="file-upload__icon">"↑"</div>
            <p class="file-upload__text">
                {move || if uploading.get() { "Uploading..." } else { "Drag & drop files here, or click to browse" }}
            </p>
            <p class="file-upload__subtext">"Upload one or more .csv files, a .zip file, or a folder"</p>
            <input
                node_ref=input_ref
                type="file"
                accept=".zip,.csv"
                multiple
                on:click=|ev| ev.stop_propagation()
                on:change=on_change
            />
        </div>
    }
}
