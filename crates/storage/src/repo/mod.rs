mod categories;
mod comments;
mod content;
mod reactions;
