//! Customer-side ordering core: the cart, the checkout form and the
//! submission of an order through a [`CheckoutGateway`].

pub mod cart;
pub mod gateway;
pub mod notice;
pub mod session;
pub mod validation;

pub use cart::{Cart, CartLine, MAX_LINE_QUANTITY, MenuItemSnapshot, format_money, subtotal_of};
pub use gateway::{CheckoutGateway, GatewayError, InProcessGateway};
pub use notice::{Notice, NoticeKind};
pub use session::{CheckoutError, CheckoutSession, DEFAULT_SUBMIT_TIMEOUT};
pub use validation::{CustomerDetails, ValidationError, validate};
