use std::rc::Rc;
use std::time::Duration;

use crossterm::event::{self, Event, KeyEvent, KeyEventKind};
use ratatui::layout::{Constraint, Layout};
use ratatui::{Frame, Terminal};
use tokio::runtime::{Builder, Runtime};
use tokio::task::LocalSet;
use tracing::debug;

use crate::checkout::{DeliveryFormController, PaymentFormController};
use crate::config::CheckoutConfig;
use crate::form::FocusRequest;
use crate::model::{Clock, cart_total};
use crate::order::{InMemoryOrderStore, OrderState, Screen};
use crate::purchase::SimulatedCheckout;

use super::action::Action;
use super::error::AppError;
use super::screens::{
    AddressFormState, CardFormState, CartState, draw_address_form, draw_card_form, draw_cart,
    draw_confirmation, handle_confirmation_key,
};
use super::widgets::{StatusBarContext, draw_status_bar};

/// How long the event loop waits for a key before driving background tasks.
const TICK: Duration = Duration::from_millis(50);

/// Top-level application state.
///
/// The current screen lives in the order state, so successful form submits
/// navigate on their own. Purchases run on a local task set that the event
/// loop drives between key presses.
pub struct App {
    store: Rc<InMemoryOrderStore>,
    cart: CartState,
    address_form: AddressFormState,
    card_form: CardFormState,
    runtime: Runtime,
    tasks: LocalSet,
    should_quit: bool,
}

impl App {
    /// Creates the app on whatever screen `store` is showing.
    pub fn new(
        config: CheckoutConfig,
        store: Rc<InMemoryOrderStore>,
        api: Rc<SimulatedCheckout>,
        clock: Rc<dyn Clock>,
    ) -> Result<Self, AppError> {
        let delivery_focus = FocusRequest::new();
        let delivery =
            DeliveryFormController::new(config, Rc::clone(&store), Rc::clone(&clock))
                .with_focus_target(delivery_focus.clone());

        let payment_focus = FocusRequest::new();
        let payment = PaymentFormController::new(config, Rc::clone(&store), api, clock)
            .with_focus_target(payment_focus.clone());

        let mut cart = CartState::new();
        cart.load(store.as_ref());

        let runtime = Builder::new_current_thread().enable_time().build()?;

        Ok(Self {
            store,
            cart,
            address_form: AddressFormState::new(Rc::new(delivery), delivery_focus),
            card_form: CardFormState::new(Rc::new(payment), payment_focus),
            runtime,
            tasks: LocalSet::new(),
            should_quit: false,
        })
    }

    /// Main event loop: drive tasks → draw → poll for a key → dispatch.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    pub fn run<B: ratatui::backend::Backend>(
        &mut self,
        terminal: &mut Terminal<B>,
    ) -> Result<(), AppError> {
        while !self.should_quit {
            self.tick();
            terminal.draw(|frame| self.draw(frame))?;
            if event::poll(TICK)?
                && let Event::Key(key) = event::read()?
            {
                self.handle_key(key);
            }
        }
        Ok(())
    }

    /// Gives pending purchases a chance to progress, then picks up any focus
    /// request they left behind.
    pub fn tick(&mut self) {
        self.runtime
            .block_on(self.tasks.run_until(tokio::task::yield_now()));
        self.card_form.sync_focus();
    }

    /// Renders the current screen above the status bar.
    #[cfg_attr(coverage_nightly, coverage(off))]
    #[mutants::skip]
    fn draw(&self, frame: &mut Frame) {
        let [main_area, status_area] =
            Layout::vertical([Constraint::Min(0), Constraint::Length(1)]).areas(frame.area());

        match self.screen() {
            Screen::Cart => draw_cart(&self.cart, frame, main_area),
            Screen::AddressForm => draw_address_form(&self.address_form, frame, main_area),
            Screen::CardForm => draw_card_form(&self.card_form, frame, main_area),
            Screen::OrderConfirmation => {
                draw_confirmation(self.store.order_id().as_deref(), frame, main_area)
            }
        }

        draw_status_bar(&self.status_context(), frame, status_area);
    }

    /// Handles a key event by passing it to the current screen and applying
    /// the returned action.
    pub fn handle_key(&mut self, key: KeyEvent) {
        if key.kind != KeyEventKind::Press {
            return;
        }

        let action = match self.screen() {
            Screen::Cart => self.cart.handle_key(key),
            Screen::AddressForm => self.address_form.handle_key(key),
            Screen::CardForm => self.card_form.handle_key(key),
            Screen::OrderConfirmation => handle_confirmation_key(key),
        };
        self.apply(action);
    }

    fn apply(&mut self, action: Action) {
        match action {
            Action::None => {}
            Action::Navigate(screen) => {
                if screen == Screen::Cart {
                    self.cart.load(self.store.as_ref());
                }
                self.store.change_screen(screen);
            }
            Action::RemoveItem(id) => {
                if let Some(item) = self.store.remove_item(id) {
                    debug!(id, name = %item.name, "item removed from cart");
                }
                self.cart.load(self.store.as_ref());
            }
            Action::DeliveryAccepted => self.card_form.prefill(),
            Action::PlaceOrder => {
                self.tasks.spawn_local(self.card_form.place_order());
            }
            Action::FinishOrder => {
                self.store.finish_order();
                self.address_form.reset();
                self.card_form.reset();
                self.cart.load(self.store.as_ref());
            }
            Action::Quit => self.should_quit = true,
        }
    }

    /// Returns the current screen.
    pub fn screen(&self) -> Screen {
        self.store.screen()
    }

    /// Returns `true` if the app should quit.
    pub fn should_quit(&self) -> bool {
        self.should_quit
    }

    fn status_context(&self) -> StatusBarContext {
        let items = self.store.cart_items();
        StatusBarContext {
            screen: self.screen(),
            item_count: items.len(),
            total: cart_total(&items),
        }
    }
}
