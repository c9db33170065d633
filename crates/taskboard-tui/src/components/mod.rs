pub mod form_modal;
pub mod loading;
pub mod panel;
pub mod popup;
pub mod toast;

pub use form_modal::{FormAction, FormField, FormModal};
pub use loading::LoadingIndicator;
pub use panel::{render_panel, PanelConfig};
pub use popup::{centered_rect, render_confirm_popup, render_popup_with_block};
pub use toast::{Toast, ToastKind, ToastState, TOAST_TTL};
