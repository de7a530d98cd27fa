//! Revision assembly

use std::collections::HashMap;
use std::sync::Arc;

use qa_types::{BaseData, LineItem, PartView, QuoteRevision, RevisionView};
use tracing::debug;

/// Join revisions with their line items and the shared base data
///
/// Output order follows `revisions`. Every view points at the same `base`.
/// Items are grouped by their owning revision number and keep their
/// relative order.
pub fn assemble(
	revisions: &[QuoteRevision],
	line_items: &[LineItem],
	base: &Arc<BaseData>,
) -> Vec<RevisionView> {
	let mut parts_by_revision: HashMap<u32, Vec<PartView>> = HashMap::new();
	for item in line_items {
		parts_by_revision
			.entry(item.revision)
			.or_default()
			.push(PartView::from(item));
	}

	let views: Vec<RevisionView> = revisions
		.iter()
		.map(|revision| RevisionView {
			revision: revision.revision,
			base: Arc::clone(base),
			rates: revision.rates(),
			parts: parts_by_revision
				.get(&revision.revision)
				.cloned()
				.unwrap_or_default(),
		})
		.collect();

	let orphaned = line_items
		.iter()
		.filter(|item| !revisions.iter().any(|r| r.revision == item.revision))
		.count();
	if orphaned > 0 {
		debug!("{} line item(s) reference a missing revision", orphaned);
	}

	views
}
