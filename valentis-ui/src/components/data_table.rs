use leptos::*;
use std::rc::Rc;

/// One table column: a heading plus how to render a row's cell.
pub struct Column<R> {
    label: String,
    clickable: bool,
    render: Rc<dyn Fn(&R) -> View>,
}

impl<R> Clone for Column<R> {
    fn clone(&self) -> Self {
        Self {
            label: self.label.clone(),
            clickable: self.clickable,
            render: Rc::clone(&self.render),
        }
    }
}

impl<R: 'static> Column<R> {
    pub fn new<V: IntoView>(label: impl Into<String>, render: impl Fn(&R) -> V + 'static) -> Self {
        Self {
            label: label.into(),
            clickable: false,
            render: Rc::new(move |row| render(row).into_view()),
        }
    }

    /// Styles the cell as a link target.
    pub fn clickable(mut self) -> Self {
        self.clickable = true;
        self
    }
}

/// Static table over already-loaded rows.
///
/// Without `empty_message`, an empty table collapses to "No data available";
/// with it, the headings stay and the message spans the body.
#[component]
pub fn DataTable<R>(
    columns: Vec<Column<R>>,
    rows: Vec<R>,
    #[prop(optional)] on_row_click: Option<Callback<R>>,
    #[prop(optional, into)] empty_message: Option<String>,
) -> impl IntoView
where
    R: Clone + 'static,
{
    if rows.is_empty() && empty_message.is_none() {
        return view! { <div class="loading">"No data available"</div> }.into_view();
    }

    let headings = columns
        .iter()
        .map(|col| view! { <th>{col.label.clone()}</th> })
        .collect_view();

    let body = if rows.is_empty() {
        let span = columns.len().max(1).to_string();
        view! {
            <tr>
                <td class="data-table__empty" colspan=span>{empty_message.unwrap_or_default()}</td>
            </tr>
        }
        .into_view()
    } else {
        rows.into_iter()
            .map(|row| {
                let cells = columns
                    .iter()
                    .map(|col| view! { <td class:clickable=col.clickable>{(col.render)(&row)}</td> })
                    .collect_view();
                let on_click = move |_| {
                    if let Some(callback) = on_row_click {
                        callback.call(row.clone());
                    }
                };
                let class = if on_row_click.is_some() { "data-table__row--link" } else { "" };
                view! { <tr class=class on:click=on_click>{cells}</tr> }
            })
            .collect_view()
    };

    view! {
        <div class="data-table-wrapper">
            <table class="data-table">
                <thead>
                    <tr>{headings}</tr>
                </thead>
                <tbody>{body}</tbody>
            </table>
        </div>
    }
    .into_view()
}
