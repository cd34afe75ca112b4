mod reindex;

pub(crate) use reindex::gather;
