pub mod cache;
pub mod dom;
pub mod error;
pub mod event;
pub mod fetch;
pub mod history;
pub mod markup;
pub mod page;
pub mod prevent;
pub mod schema;
pub mod state;
pub mod transition;
pub mod url;

pub use cache::{PageCache, PageFuture, ready_page};
pub use dom::{Document, ElementRef};
pub use error::{NavigationError, SetupError};
pub use event::{EventSource, NavEvent};
pub use fetch::{ErrorDisposition, FetchError, Fetcher, RequestErrorHandler};
pub use history::{HistoryEntry, HistoryLog};
pub use page::PageRecord;
pub use prevent::{PreventCheck, PreventGuard, PreventRule};
pub use schema::AttributeSchema;
pub use state::{NavigationState, Trigger};
pub use transition::{AppearCtx, Criteria, PageCtx, TransitionHandle, TransitionRunner};
pub use url::PageUrl;
