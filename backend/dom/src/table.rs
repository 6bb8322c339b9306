//! Table construction from header and row data.

use tracing::debug;

use crate::document::{Document, NodeId};

fn element(doc: &mut Document, tag: &str) -> NodeId {
    doc.create(tag, std::iter::empty::<(String, String)>(), "")
}

/// Build `table > thead > tr > th*` (when `header` is given) and
/// `tbody > tr.tr{i} > td.td{j}*`. Cell values are set as escaped text.
pub fn table<S: AsRef<str>>(doc: &mut Document, header: Option<&[S]>, rows: &[Vec<S>]) -> NodeId {
    let root = element(doc, "table");

    if let Some(header) = header {
        let thead = element(doc, "thead");
        let tr = element(doc, "tr");
        for cell in header {
            let th = element(doc, "th");
            doc.set_text(th, cell.as_ref());
            doc.append(tr, th);
        }
        doc.append(thead, tr);
        doc.append(root, thead);
    }

    let tbody = element(doc, "tbody");
    for (i, row) in rows.iter().enumerate() {
        let tr = element(doc, "tr");
        doc.set_attr(tr, "class", format!("tr{i}"));
        for (j, cell) in row.iter().enumerate() {
            let td = element(doc, "td");
            doc.set_attr(td, "class", format!("td{j}"));
            doc.set_text(td, cell.as_ref());
            doc.append(tr, td);
        }
        doc.append(tbody, tr);
    }
    doc.append(root, tbody);

    debug!(rows = rows.len(), header = header.is_some(), "Built table");
    root
}
