//! In-memory port fakes shared by the use-case tests.

use std::collections::HashMap;
use std::sync::Mutex;
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use chrono::Utc;
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::application::ports::asset_storage::{AssetKind, AssetStorage, StoredAsset};
use crate::application::ports::book_repository::BookRepository;
use crate::application::ports::cart_repository::CartRepository;
use crate::application::ports::category_repository::CategoryRepository;
use crate::application::ports::checkout_repository::{CheckoutRepository, CheckoutSession};
use crate::application::ports::coupon_repository::CouponRepository;
use crate::application::ports::order_repository::OrderRepository;
use crate::application::ports::payment_gateway::{
    GatewayError, GatewayOrder, GatewayOrderRequest, PaymentGateway,
};
use crate::application::ports::user_repository::{UserCredentials, UserRepository};
use crate::domain::cart::cart::{CartLine, CartMutation};
use crate::domain::catalog::book::{Book, BookPatch, NewBook};
use crate::domain::catalog::category::Category;
use crate::domain::coupons::coupon::{Coupon, DiscountType, NewCoupon};
use crate::domain::orders::order::{
    ChatMessage, DeliveryStatus, NewOrder, NewOrderItem, Order, OrderItem, OrderWithBuyer,
    PaymentStatus, RefundRequest, ShippingSnapshot, TrackingEvent,
};
use crate::domain::users::user::{ProfileUpdate, Role, User};
use crate::infrastructure::crypto;

#[derive(Default)]
struct State {
    users: Vec<UserCredentials>,
    books: Vec<Book>,
    categories: Vec<Category>,
    /// user id -> (book id, quantity) in insertion order
    carts: HashMap<Uuid, Vec<(Uuid, i32)>>,
    coupons: Vec<Coupon>,
    checkouts: Vec<CheckoutSession>,
    orders: Vec<Order>,
}

#[derive(Default)]
pub struct InMemoryStore {
    state: Mutex<State>,
}

impl InMemoryStore {
    pub fn insert_user(&self, user: User) -> User {
        self.state.lock().unwrap().users.push(UserCredentials {
            user: user.clone(),
            password_hash: String::new(),
        });
        user
    }

    pub fn insert_book(&self, book: Book) -> Book {
        self.state.lock().unwrap().books.push(book.clone());
        book
    }

    pub fn insert_coupon(&self, coupon: Coupon) {
        self.state.lock().unwrap().coupons.push(coupon);
    }
}

pub fn sample_user(name: &str) -> User {
    let now = Utc::now();
    User {
        id: Uuid::new_v4(),
        name: name.into(),
        email: format!("{}@example.com", name.to_lowercase()),
        role: Role::User,
        phone: None,
        address: None,
        created_at: now,
        updated_at: now,
    }
}

pub fn sample_book(title: &str, author: &str, price_rupees: i64) -> Book {
    let now = Utc::now();
    let stem = title.to_lowercase().replace(' ', "_");
    Book {
        id: Uuid::new_v4(),
        title: title.into(),
        author: author.into(),
        description: format!("{title} by {author}"),
        price: Decimal::new(price_rupees, 0),
        category: "fiction".into(),
        cover_path: format!("covers/{stem}.png"),
        pdf_path: format!("pdfs/{stem}.pdf"),
        created_at: now,
        updated_at: now,
    }
}

pub fn sample_coupon(code: &str, kind: DiscountType, value: i64) -> Coupon {
    Coupon {
        id: Uuid::new_v4(),
        code: code.into(),
        discount_type: kind,
        discount_value: Decimal::new(value, 0),
        is_active: true,
        expires_at: None,
        created_at: Utc::now(),
    }
}

/// Places a paid order for `user_id` with one copy of each title.
pub async fn placed_order(store: &InMemoryStore, user_id: Uuid, titles: &[&str]) -> Uuid {
    let now = Utc::now();
    let items: Vec<NewOrderItem> = titles
        .iter()
        .map(|t| NewOrderItem {
            book_id: Uuid::new_v4(),
            title: (*t).into(),
            cover_path: format!("covers/{}.png", t.to_lowercase().replace(' ', "_")),
            quantity: 1,
            price: Decimal::new(100, 0),
        })
        .collect();
    let total = Decimal::new(100 * items.len() as i64, 0);
    store
        .place(&NewOrder {
            user_id,
            items,
            subtotal: total,
            discount: Decimal::ZERO,
            total_amount: total,
            coupon_code: None,
            gateway_order_id: format!("order_{}", Uuid::new_v4().simple()),
            gateway_payment_id: "pay_test".into(),
            estimated_delivery_date: now,
            shipping: ShippingSnapshot::default(),
            initial_event: TrackingEvent {
                status: "Pending".into(),
                message: "Your order has been placed successfully.".into(),
                created_at: now,
            },
        })
        .await
        .unwrap()
}

#[async_trait]
impl UserRepository for InMemoryStore {
    async fn create_user(
        &self,
        name: &str,
        email: &str,
        password_hash: &str,
    ) -> anyhow::Result<Option<User>> {
        let mut st = self.state.lock().unwrap();
        if st.users.iter().any(|c| c.user.email == email) {
            return Ok(None);
        }
        let mut user = sample_user(name);
        user.email = email.into();
        st.users.push(UserCredentials {
            user: user.clone(),
            password_hash: password_hash.into(),
        });
        Ok(Some(user))
    }

    async fn find_credentials_by_email(
        &self,
        email: &str,
    ) -> anyhow::Result<Option<UserCredentials>> {
        let st = self.state.lock().unwrap();
        Ok(st.users.iter().find(|c| c.user.email == email).cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> anyhow::Result<Option<User>> {
        let st = self.state.lock().unwrap();
        Ok(st.users.iter().find(|c| c.user.id == id).map(|c| c.user.clone()))
    }

    async fn list_all(&self) -> anyhow::Result<Vec<User>> {
        let st = self.state.lock().unwrap();
        Ok(st.users.iter().rev().map(|c| c.user.clone()).collect())
    }

    async fn update_profile(
        &self,
        id: Uuid,
        update: &ProfileUpdate,
    ) -> anyhow::Result<Option<User>> {
        let mut st = self.state.lock().unwrap();
        let Some(creds) = st.users.iter_mut().find(|c| c.user.id == id) else {
            return Ok(None);
        };
        let user = &mut creds.user;
        if let Some(n) = &update.name {
            user.name = n.clone();
        }
        if let Some(p) = &update.phone {
            user.phone = Some(p.clone());
        }
        if let Some(a) = &update.address {
            user.address = Some(a.clone());
        }
        user.updated_at = Utc::now();
        Ok(Some(user.clone()))
    }
}

#[async_trait]
impl BookRepository for InMemoryStore {
    async fn list(&self, search: Option<String>) -> anyhow::Result<Vec<Book>> {
        let st = self.state.lock().unwrap();
        let needle = search.map(|s| s.to_lowercase());
        Ok(st
            .books
            .iter()
            .rev()
            .filter(|b| match &needle {
                Some(n) => b.title.to_lowercase().contains(n) || b.author.to_lowercase().contains(n),
                None => true,
            })
            .cloned()
            .collect())
    }

    async fn list_by_category(&self, category: &str) -> anyhow::Result<Vec<Book>> {
        let st = self.state.lock().unwrap();
        Ok(st.books.iter().rev().filter(|b| b.category == category).cloned().collect())
    }

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Book>> {
        let st = self.state.lock().unwrap();
        Ok(st.books.iter().find(|b| b.id == id).cloned())
    }

    async fn create(&self, book: &NewBook) -> anyhow::Result<Book> {
        let now = Utc::now();
        let created = Book {
            id: Uuid::new_v4(),
            title: book.title.clone(),
            author: book.author.clone(),
            description: book.description.clone(),
            price: book.price,
            category: book.category.clone(),
            cover_path: book.cover_path.clone(),
            pdf_path: book.pdf_path.clone(),
            created_at: now,
            updated_at: now,
        };
        Ok(self.insert_book(created))
    }

    async fn update(&self, id: Uuid, patch: &BookPatch) -> anyhow::Result<Option<Book>> {
        let mut st = self.state.lock().unwrap();
        let Some(book) = st.books.iter_mut().find(|b| b.id == id) else {
            return Ok(None);
        };
        if let Some(v) = &patch.title {
            book.title = v.clone();
        }
        if let Some(v) = &patch.author {
            book.author = v.clone();
        }
        if let Some(v) = &patch.description {
            book.description = v.clone();
        }
        if let Some(v) = patch.price {
            book.price = v;
        }
        if let Some(v) = &patch.category {
            book.category = v.clone();
        }
        book.updated_at = Utc::now();
        Ok(Some(book.clone()))
    }

    async fn delete(&self, id: Uuid) -> anyhow::Result<Option<Book>> {
        let mut st = self.state.lock().unwrap();
        let pos = st.books.iter().position(|b| b.id == id);
        Ok(pos.map(|i| st.books.remove(i)))
    }
}

#[async_trait]
impl CategoryRepository for InMemoryStore {
    async fn list(&self) -> anyhow::Result<Vec<Category>> {
        let st = self.state.lock().unwrap();
        let mut out = st.categories.clone();
        out.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(out)
    }

    async fn create(&self, name: &str, slug: &str) -> anyhow::Result<Option<Category>> {
        let mut st = self.state.lock().unwrap();
        if st.categories.iter().any(|c| c.slug == slug) {
            return Ok(None);
        }
        let c = Category {
            id: Uuid::new_v4(),
            name: name.into(),
            slug: slug.into(),
            created_at: Utc::now(),
        };
        st.categories.push(c.clone());
        Ok(Some(c))
    }
}

#[async_trait]
impl CartRepository for InMemoryStore {
    async fn lines_for_user(&self, user_id: Uuid) -> anyhow::Result<Option<Vec<CartLine>>> {
        let st = self.state.lock().unwrap();
        let Some(entries) = st.carts.get(&user_id) else {
            return Ok(None);
        };
        Ok(Some(
            entries
                .iter()
                .filter_map(|(book_id, qty)| {
                    st.books.iter().find(|b| b.id == *book_id).map(|b| CartLine {
                        book: b.clone(),
                        quantity: *qty,
                    })
                })
                .collect(),
        ))
    }

    async fn add_item(&self, user_id: Uuid, book_id: Uuid, quantity: i32) -> anyhow::Result<()> {
        let mut st = self.state.lock().unwrap();
        let entries = st.carts.entry(user_id).or_default();
        match entries.iter_mut().find(|(b, _)| *b == book_id) {
            Some((_, q)) => *q += quantity,
            None => entries.push((book_id, quantity)),
        }
        Ok(())
    }

    async fn remove_item(&self, user_id: Uuid, book_id: Uuid) -> anyhow::Result<CartMutation> {
        let mut st = self.state.lock().unwrap();
        let Some(entries) = st.carts.get_mut(&user_id) else {
            return Ok(CartMutation::CartMissing);
        };
        let before = entries.len();
        entries.retain(|(b, _)| *b != book_id);
        Ok(if entries.len() < before {
            CartMutation::Applied
        } else {
            CartMutation::ItemMissing
        })
    }

    async fn set_quantity(
        &self,
        user_id: Uuid,
        book_id: Uuid,
        quantity: i32,
    ) -> anyhow::Result<CartMutation> {
        let mut st = self.state.lock().unwrap();
        let Some(entries) = st.carts.get_mut(&user_id) else {
            return Ok(CartMutation::CartMissing);
        };
        match entries.iter_mut().find(|(b, _)| *b == book_id) {
            Some((_, q)) => {
                *q = quantity;
                Ok(CartMutation::Applied)
            }
            None => Ok(CartMutation::ItemMissing),
        }
    }
}

#[async_trait]
impl CouponRepository for InMemoryStore {
    async fn find_by_code(&self, code: &str) -> anyhow::Result<Option<Coupon>> {
        let st = self.state.lock().unwrap();
        Ok(st.coupons.iter().find(|c| c.code == code).cloned())
    }

    async fn create(&self, coupon: &NewCoupon) -> anyhow::Result<Option<Coupon>> {
        let mut st = self.state.lock().unwrap();
        if st.coupons.iter().any(|c| c.code == coupon.code) {
            return Ok(None);
        }
        let c = Coupon {
            id: Uuid::new_v4(),
            code: coupon.code.clone(),
            discount_type: coupon.discount_type,
            discount_value: coupon.discount_value,
            is_active: true,
            expires_at: coupon.expires_at,
            created_at: Utc::now(),
        };
        st.coupons.push(c.clone());
        Ok(Some(c))
    }

    async fn list(&self) -> anyhow::Result<Vec<Coupon>> {
        let st = self.state.lock().unwrap();
        Ok(st.coupons.iter().rev().cloned().collect())
    }

    async fn toggle_active(&self, id: Uuid) -> anyhow::Result<Option<Coupon>> {
        let mut st = self.state.lock().unwrap();
        Ok(st.coupons.iter_mut().find(|c| c.id == id).map(|c| {
            c.is_active = !c.is_active;
            c.clone()
        }))
    }
}

#[async_trait]
impl CheckoutRepository for InMemoryStore {
    async fn save(&self, session: &CheckoutSession) -> anyhow::Result<()> {
        self.state.lock().unwrap().checkouts.push(session.clone());
        Ok(())
    }

    async fn find(
        &self,
        gateway_order_id: &str,
        user_id: Uuid,
    ) -> anyhow::Result<Option<CheckoutSession>> {
        let st = self.state.lock().unwrap();
        Ok(st
            .checkouts
            .iter()
            .find(|s| s.gateway_order_id == gateway_order_id && s.user_id == user_id)
            .cloned())
    }
}

#[async_trait]
impl OrderRepository for InMemoryStore {
    async fn place(&self, order: &NewOrder) -> anyhow::Result<Uuid> {
        let mut st = self.state.lock().unwrap();
        if let Some(existing) = st
            .orders
            .iter()
            .find(|o| o.gateway_order_id.as_deref() == Some(order.gateway_order_id.as_str()))
        {
            return Ok(existing.id);
        }
        let now = Utc::now();
        let placed = Order {
            id: Uuid::new_v4(),
            user_id: order.user_id,
            items: order
                .items
                .iter()
                .map(|i| OrderItem {
                    id: Uuid::new_v4(),
                    book_id: Some(i.book_id),
                    title: i.title.clone(),
                    cover_path: i.cover_path.clone(),
                    quantity: i.quantity,
                    price: i.price,
                    refund: RefundRequest::default(),
                })
                .collect(),
            subtotal: order.subtotal,
            discount: order.discount,
            total_amount: order.total_amount,
            coupon_code: order.coupon_code.clone(),
            gateway_order_id: Some(order.gateway_order_id.clone()),
            gateway_payment_id: Some(order.gateway_payment_id.clone()),
            payment_status: PaymentStatus::Success,
            delivery_status: DeliveryStatus::Pending,
            estimated_delivery_date: Some(order.estimated_delivery_date),
            shipping: order.shipping.clone(),
            tracking_history: vec![order.initial_event.clone()],
            chat_history: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        let id = placed.id;
        st.orders.push(placed);
        st.carts.remove(&order.user_id);
        Ok(id)
    }

    async fn find_by_gateway_order(
        &self,
        gateway_order_id: &str,
    ) -> anyhow::Result<Option<Uuid>> {
        let st = self.state.lock().unwrap();
        Ok(st
            .orders
            .iter()
            .find(|o| o.gateway_order_id.as_deref() == Some(gateway_order_id))
            .map(|o| o.id))
    }

    async fn get_by_id(&self, id: Uuid) -> anyhow::Result<Option<Order>> {
        let st = self.state.lock().unwrap();
        Ok(st.orders.iter().find(|o| o.id == id).cloned())
    }

    async fn list_for_user(&self, user_id: Uuid) -> anyhow::Result<Vec<Order>> {
        let st = self.state.lock().unwrap();
        Ok(st.orders.iter().rev().filter(|o| o.user_id == user_id).cloned().collect())
    }

    async fn list_all(&self) -> anyhow::Result<Vec<OrderWithBuyer>> {
        let st = self.state.lock().unwrap();
        Ok(st
            .orders
            .iter()
            .rev()
            .map(|o| {
                let buyer = st.users.iter().find(|c| c.user.id == o.user_id);
                OrderWithBuyer {
                    order: o.clone(),
                    buyer_name: buyer.map(|c| c.user.name.clone()),
                    buyer_email: buyer.map(|c| c.user.email.clone()),
                }
            })
            .collect())
    }

    async fn set_delivery_status(
        &self,
        order_id: Uuid,
        status: DeliveryStatus,
        event: &TrackingEvent,
    ) -> anyhow::Result<bool> {
        let mut st = self.state.lock().unwrap();
        let Some(order) = st.orders.iter_mut().find(|o| o.id == order_id) else {
            return Ok(false);
        };
        order.delivery_status = status;
        order.tracking_history.push(event.clone());
        Ok(true)
    }

    async fn set_item_refund(
        &self,
        order_id: Uuid,
        item_id: Uuid,
        refund: &RefundRequest,
        event: &TrackingEvent,
    ) -> anyhow::Result<bool> {
        let mut st = self.state.lock().unwrap();
        let Some(order) = st.orders.iter_mut().find(|o| o.id == order_id) else {
            return Ok(false);
        };
        let Some(item) = order.items.iter_mut().find(|i| i.id == item_id) else {
            return Ok(false);
        };
        item.refund = refund.clone();
        order.tracking_history.push(event.clone());
        Ok(true)
    }

    async fn append_chat(&self, order_id: Uuid, message: &ChatMessage) -> anyhow::Result<()> {
        let mut st = self.state.lock().unwrap();
        if let Some(order) = st.orders.iter_mut().find(|o| o.id == order_id) {
            order.chat_history.push(message.clone());
        }
        Ok(())
    }

    async fn user_purchased_book(&self, user_id: Uuid, book_id: Uuid) -> anyhow::Result<bool> {
        let st = self.state.lock().unwrap();
        Ok(st.orders.iter().any(|o| {
            o.user_id == user_id
                && o.payment_status == PaymentStatus::Success
                && o.items.iter().any(|i| i.book_id == Some(book_id))
        }))
    }
}

#[derive(Default)]
pub struct MemoryAssets {
    files: Mutex<HashMap<String, Vec<u8>>>,
    seq: AtomicU64,
}

impl MemoryAssets {
    pub fn len(&self) -> usize {
        self.files.lock().unwrap().len()
    }

    pub fn put(&self, path: &str, bytes: Vec<u8>) {
        self.files.lock().unwrap().insert(path.to_string(), bytes);
    }
}

#[async_trait]
impl AssetStorage for MemoryAssets {
    async fn store(
        &self,
        kind: AssetKind,
        original_filename: Option<&str>,
        bytes: &[u8],
    ) -> anyhow::Result<StoredAsset> {
        let n = self.seq.fetch_add(1, Ordering::Relaxed);
        let name = original_filename.unwrap_or("upload");
        let relative_path = format!("{}/{n}_{name}", kind.dir());
        self.put(&relative_path, bytes.to_vec());
        Ok(StoredAsset { relative_path })
    }

    async fn read(&self, relative_path: &str) -> anyhow::Result<Vec<u8>> {
        self.files
            .lock()
            .unwrap()
            .get(relative_path)
            .cloned()
            .ok_or_else(|| anyhow::anyhow!("not found: {relative_path}"))
    }

    async fn delete(&self, relative_path: &str) -> anyhow::Result<()> {
        self.files.lock().unwrap().remove(relative_path);
        Ok(())
    }
}

/// Gateway double that hands out sequential order ids and signs like the real one.
pub struct FakeGateway {
    secret: String,
    seq: AtomicU64,
}

impl FakeGateway {
    pub fn new(secret: &str) -> Self {
        Self {
            secret: secret.into(),
            seq: AtomicU64::new(1),
        }
    }

    pub fn sign(&self, order_id: &str, payment_id: &str) -> String {
        crypto::sign_payment(&self.secret, order_id, payment_id)
    }
}

#[async_trait]
impl PaymentGateway for FakeGateway {
    fn key_id(&self) -> &str {
        "rzp_test_key"
    }

    async fn create_order(&self, req: &GatewayOrderRequest) -> Result<GatewayOrder, GatewayError> {
        let n = self.seq.fetch_add(1, Ordering::Relaxed);
        Ok(GatewayOrder {
            id: format!("order_test{n}"),
            amount: req.amount,
            currency: req.currency.clone(),
        })
    }

    fn verify_payment_signature(&self, order_id: &str, payment_id: &str, signature: &str) -> bool {
        crypto::verify_payment_signature(&self.secret, order_id, payment_id, signature)
    }
}
