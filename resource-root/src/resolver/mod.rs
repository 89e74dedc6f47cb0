pub(crate) mod path_history;

#[cfg(test)]
mod tests;
