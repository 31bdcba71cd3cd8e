//! Interactive shopping shell.
//!
//! Reads one command per line and keeps a [`Session`] alive between them.
//! Mistakes the shopper can fix (unknown product, sold-out variant, missing
//! checkout field) are reported and the shell carries on; I/O and
//! configuration failures end it.

use std::io::Write;

use secrecy::SecretString;
use tokio::io::{AsyncBufRead, AsyncBufReadExt};
use tokio::sync::broadcast::{self, error::TryRecvError};

use notori_core::{AuthProvider, CurrencyCode, PaymentMethod, ProductId, VariantKey};
use notori_storefront::models::{CardDetails, OrderConfirmation};
use notori_storefront::services::CheckoutError;
use notori_storefront::{CartChange, Session, StoreError};

use super::CommandError;
use super::browse::write_product_row;

const HELP: &str = "\
Commands:
  list                              show the catalog
  add <id> [size] [color] [qty]     add to cart (defaults: preselected size/color, 1)
  qty <line|key> <n>                set a line's quantity (0 removes)
  remove <line|key>                 remove a line
  cart                              show the cart
  wish <id>                         save or unsave a product
  wishlist                          show saved products
  currency <code>                   switch display currency
  signin <email> <password>         sign in
  signup <email> <password> <name>  create an account
  social <provider>                 sign in with google, facebook or instagram
  signout                           sign out
  checkout                          fill in the checkout form and pay
  express <shop_pay|google_pay>     one-click checkout
  help                              show this help
  quit                              leave the store";

enum Flow {
    Continue,
    Quit,
}

/// Line-oriented shopping shell.
pub struct Shell<R, W> {
    session: Session,
    input: R,
    out: W,
    cart_changes: broadcast::Receiver<CartChange>,
}

impl<R, W> Shell<R, W>
where
    R: AsyncBufRead + Unpin,
    W: Write,
{
    #[must_use]
    pub fn new(session: Session, input: R, out: W) -> Self {
        let cart_changes = session.cart().subscribe();
        Self {
            session,
            input,
            out,
            cart_changes,
        }
    }

    /// Run until `quit` or end of input, handing the session back.
    ///
    /// # Errors
    ///
    /// Returns an error if reading input or writing output fails, or a
    /// storefront operation fails in a way the shopper cannot fix.
    pub async fn run(mut self) -> Result<Session, CommandError> {
        writeln!(self.out, "Welcome to Notori Y2. Type `help` for commands.")?;

        loop {
            write!(self.out, "> ")?;
            self.out.flush()?;
            let Some(line) = self.read_line().await? else {
                break;
            };
            let line = line.trim();
            if line.is_empty() {
                continue;
            }

            match self.dispatch(line).await {
                Ok(Flow::Continue) => {}
                Ok(Flow::Quit) => break,
                Err(CommandError::Store(err)) if err.is_user_error() => {
                    tracing::debug!(error = %err, "Command rejected");
                    writeln!(self.out, "error: {err}")?;
                }
                Err(err) => return Err(err),
            }
            self.report_cart_changes()?;
        }

        writeln!(self.out, "Bye.")?;
        Ok(self.session)
    }

    async fn read_line(&mut self) -> Result<Option<String>, CommandError> {
        let mut line = String::new();
        if self.input.read_line(&mut line).await? == 0 {
            return Ok(None);
        }
        Ok(Some(line))
    }

    async fn dispatch(&mut self, line: &str) -> Result<Flow, CommandError> {
        let (command, rest) = line.split_once(' ').unwrap_or((line, ""));
        let args: Vec<&str> = rest.split_whitespace().collect();

        match (command, args.as_slice()) {
            ("quit" | "exit", _) => return Ok(Flow::Quit),
            ("help", _) => writeln!(self.out, "{HELP}")?,
            ("list", _) => {
                for product in self.session.catalog().products() {
                    write_product_row(&self.session, product, &mut self.out)?;
                }
            }
            ("add", [id, variant @ ..]) => self.add(id, variant)?,
            ("qty", [target @ .., n]) if !target.is_empty() => self.set_quantity(target, n)?,
            ("remove", [_, ..]) => self.remove(&args)?,
            ("cart", _) => self.show_cart()?,
            ("wish", [id]) => {
                let saved = self.session.toggle_wishlist(&ProductId::new(*id))?;
                let verb = if saved { "Saved" } else { "Removed" };
                writeln!(self.out, "{verb} {id}; wishlist has {}", self.session.wishlist().len())?;
            }
            ("wishlist", _) => self.show_wishlist()?,
            ("currency", [code]) => match code.parse::<CurrencyCode>() {
                Ok(code) => {
                    self.session.select_currency(code);
                    writeln!(self.out, "Prices now shown in {code}")?;
                }
                Err(err) => writeln!(self.out, "error: {err}")?,
            },
            ("signin", [email, password]) => {
                let password = SecretString::from(*password);
                let user = self.session.sign_in(email, &password).await?;
                writeln!(self.out, "Signed in as {}", user.name)?;
            }
            ("signup", [email, password, name @ ..]) => {
                let password = SecretString::from(*password);
                let user = self
                    .session
                    .sign_up(email, &password, &name.join(" "))
                    .await?;
                writeln!(self.out, "Welcome, {}", user.name)?;
            }
            ("social", [provider]) => match provider.parse::<AuthProvider>() {
                Ok(provider) => {
                    let user = self.session.sign_in_with_provider(provider).await?;
                    writeln!(self.out, "Signed in with {} as {}", provider.label(), user.name)?;
                }
                Err(err) => writeln!(self.out, "error: {err}")?,
            },
            ("signout", _) => {
                self.session.sign_out();
                writeln!(self.out, "Signed out")?;
            }
            ("checkout", _) => self.checkout().await?,
            ("express", [method]) => match method.parse::<PaymentMethod>() {
                Ok(method) => {
                    let confirmation = self.session.express_checkout(method).await?;
                    self.show_confirmation(&confirmation)?;
                }
                Err(err) => writeln!(self.out, "error: {err}")?,
            },
            _ => writeln!(self.out, "Unknown command or arguments: {line} (try `help`)")?,
        }
        Ok(Flow::Continue)
    }

    /// `add <id> [size] [color...] [qty]`; colors may contain spaces.
    fn add(&mut self, id: &str, variant: &[&str]) -> Result<(), CommandError> {
        // A lone numeric word is a waist size, not a quantity.
        let (variant, quantity) = match variant.split_last().map(|(last, rest)| (last.parse::<u32>(), rest)) {
            Some((Ok(quantity), rest)) if !rest.is_empty() => (rest, quantity),
            _ => (variant, 1),
        };
        let size = variant.first().copied();
        let color = variant.get(1..).map(|words| words.join(" ")).filter(|c| !c.is_empty());

        let id = ProductId::new(id);
        let change = self
            .session
            .add_to_cart(&id, size, color.as_deref(), quantity)?;
        if change == CartChange::Unchanged {
            writeln!(self.out, "Nothing added")?;
            return Ok(());
        }
        let name = self.session.product(&id)?.name.clone();
        writeln!(self.out, "Added {quantity} x {name}")?;
        Ok(())
    }

    fn set_quantity(&mut self, target: &[&str], n: &str) -> Result<(), CommandError> {
        let Ok(quantity) = n.parse::<i64>() else {
            writeln!(self.out, "error: quantity must be a whole number")?;
            return Ok(());
        };
        let key = self.resolve_line(target);
        if matches!(
            self.session.update_quantity(&key, quantity),
            CartChange::Unchanged
        ) {
            writeln!(self.out, "No cart line {key}")?;
        }
        Ok(())
    }

    fn remove(&mut self, target: &[&str]) -> Result<(), CommandError> {
        let key = self.resolve_line(target);
        if matches!(self.session.remove_from_cart(&key), CartChange::Unchanged) {
            writeln!(self.out, "No cart line {key}")?;
        }
        Ok(())
    }

    /// A 1-based line number from `cart`, or a variant key typed out in full.
    fn resolve_line(&self, target: &[&str]) -> VariantKey {
        let text = target.join(" ");
        text.parse::<usize>()
            .ok()
            .and_then(|n| n.checked_sub(1))
            .and_then(|i| self.session.cart().items().get(i))
            .map_or_else(|| VariantKey::from(text.as_str()), |item| item.variant_key.clone())
    }

    fn show_cart(&mut self) -> Result<(), CommandError> {
        let cart = self.session.cart();
        if cart.is_empty() {
            writeln!(self.out, "Your cart is empty")?;
            return Ok(());
        }
        for (n, item) in cart.items().iter().enumerate() {
            writeln!(
                self.out,
                "{:>2}. {} ({}) x{}  {}  [{}]",
                n + 1,
                item.name,
                item.variant_label().unwrap_or_default(),
                item.quantity,
                self.session.format_price(item.line_total()),
                item.variant_key
            )?;
        }
        writeln!(
            self.out,
            "Subtotal: {} ({} items)",
            self.session.format_price(cart.subtotal()),
            cart.item_count()
        )?;
        Ok(())
    }

    fn show_wishlist(&mut self) -> Result<(), CommandError> {
        if self.session.wishlist().is_empty() {
            writeln!(self.out, "Your wishlist is empty")?;
            return Ok(());
        }
        for product in self.session.wishlist().items() {
            write_product_row(&self.session, product, &mut self.out)?;
        }
        Ok(())
    }

    /// Walk the shopper through the checkout form, then place the order.
    async fn checkout(&mut self) -> Result<(), CommandError> {
        if self.session.cart().is_empty() {
            return Err(StoreError::from(CheckoutError::EmptyCart).into());
        }
        let summary = self.session.checkout_summary();
        writeln!(
            self.out,
            "Checkout: {} items, total {} (shipping free)",
            summary.item_count,
            self.session.format_price(summary.total)
        )?;

        let mut form = self.session.checkout_form();
        form.email = self.prompt("Email", &form.email).await?;
        form.shipping.country = self.prompt("Country", &form.shipping.country).await?;
        form.shipping.first_name = self.prompt("First name", "").await?;
        form.shipping.last_name = self.prompt("Last name", "").await?;
        form.shipping.address = self.prompt("Address", "").await?;
        form.shipping.city = self.prompt("City", "").await?;
        form.shipping.state = self.prompt("State", "").await?;
        form.shipping.zip_code = self.prompt("ZIP code", "").await?;

        form.payment_method = loop {
            let method = self
                .prompt("Payment (credit_card, paypal, shop_pay, google_pay)", "credit_card")
                .await?;
            match method.parse::<PaymentMethod>() {
                Ok(method) => break method,
                Err(err) => writeln!(self.out, "error: {err}")?,
            }
        };
        if form.payment_method == PaymentMethod::CreditCard {
            form.card = Some(self.prompt_card().await?);
        }

        let confirmation = self.session.place_order(&form).await?;
        self.show_confirmation(&confirmation)
    }

    async fn prompt_card(&mut self) -> Result<CardDetails, CommandError> {
        Ok(CardDetails {
            number: SecretString::from(self.prompt("Card number", "").await?),
            expiration: self.prompt("Expiration (MM / YY)", "").await?,
            security_code: SecretString::from(self.prompt("Security code", "").await?),
            name_on_card: self.prompt("Name on card", "").await?,
        })
    }

    /// Ask for one value; an empty answer keeps `current`.
    async fn prompt(&mut self, label: &str, current: &str) -> Result<String, CommandError> {
        if current.is_empty() {
            write!(self.out, "  {label}: ")?;
        } else {
            write!(self.out, "  {label} [{current}]: ")?;
        }
        self.out.flush()?;

        let answer = self.read_line().await?.unwrap_or_default();
        let answer = answer.trim();
        Ok(if answer.is_empty() {
            current.to_string()
        } else {
            answer.to_string()
        })
    }

    fn show_confirmation(&mut self, confirmation: &OrderConfirmation) -> Result<(), CommandError> {
        writeln!(
            self.out,
            "Order {} confirmed: {} for {} items, paid with {}",
            confirmation.order_number,
            self.session.format_price(confirmation.summary.total),
            confirmation.summary.item_count,
            confirmation.payment_method
        )?;
        if let Some(email) = &confirmation.email {
            writeln!(self.out, "A confirmation was sent to {email}")?;
        }
        Ok(())
    }

    /// Print the cart badge after commands that changed the cart.
    fn report_cart_changes(&mut self) -> Result<(), CommandError> {
        let mut changed = false;
        loop {
            match self.cart_changes.try_recv() {
                Ok(change) => {
                    tracing::debug!(?change, "Cart changed");
                    changed = true;
                }
                Err(TryRecvError::Lagged(_)) => changed = true,
                Err(TryRecvError::Empty | TryRecvError::Closed) => break,
            }
        }
        if changed {
            let cart = self.session.cart();
            writeln!(
                self.out,
                "[cart: {} items, {}]",
                cart.item_count(),
                self.session.format_price(cart.subtotal())
            )?;
        }
        Ok(())
    }
}
