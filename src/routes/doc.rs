use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    dto::{
        checkout::{CheckoutConfirmation, CheckoutRequest},
        menu::{MenuItemList, UpdateMenuItemRequest},
        orders::{OrderList, OrderWithItems},
    },
    models::{MenuItem, NewMenuItem, Order, OrderItem, OrderStatus, OrderType},
    response::{ApiResponse, Meta},
    routes::{admin, checkout, health, menu, params},
    storefront::{CartLine, CustomerDetails, MenuItemSnapshot},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        menu::list_menu,
        checkout::checkout,
        admin::list_menu_items,
        admin::create_menu_item,
        admin::update_menu_item,
        admin::delete_menu_item,
        admin::list_orders,
        admin::get_order
    ),
    components(
        schemas(
            MenuItem,
            NewMenuItem,
            Order,
            OrderItem,
            OrderStatus,
            OrderType,
            MenuItemSnapshot,
            CartLine,
            CustomerDetails,
            CheckoutRequest,
            CheckoutConfirmation,
            UpdateMenuItemRequest,
            MenuItemList,
            OrderList,
            OrderWithItems,
            params::Pagination,
            params::OrderListQuery,
            Meta,
            ApiResponse<MenuItem>,
            ApiResponse<MenuItemList>,
            ApiResponse<CheckoutConfirmation>,
            ApiResponse<OrderWithItems>,
            ApiResponse<OrderList>
        )
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Menu", description = "Public menu"),
        (name = "Checkout", description = "Order submission"),
        (name = "Admin", description = "Menu management and order review"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
