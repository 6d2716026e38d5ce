//! RecordSynthesizer: samples one internally consistent order per call.
//!
//! DRAW ORDER (fixed; changing it changes every downstream row):
//!   identity, customer, product, carrier + tier, timing, distance,
//!   shipping cost, payment, channel, rating, delivery issue, urban flag.

use crate::{
    calendar::{is_peak_season, whole_days_between, window_start, ORDER_WINDOW_DAYS},
    error::{GenError, GenResult},
    record::{flag, round_to, OrderRecord},
    reference::{
        CarrierProfile, CategoryProfile, ReferenceTables, CREDIT_CARD, ORIGIN_STATE,
        OWN_SITE_CHANNEL,
    },
    rng::Draw,
    types::{ChannelType, DeliveryIssue, DistanceTier, ShippingTier, TransactionStatus},
};
use chrono::{Duration, NaiveDateTime};
use rand::Rng;
use rand_distr::{Distribution, Exp, Normal, Poisson};

pub const ORDER_ID_PREFIX: &str = "ECOMMX-2024-";

const AGE_GROUPS: [(&str, f64); 5] = [
    ("18-24", 0.15),
    ("25-34", 0.35),
    ("35-44", 0.25),
    ("45-54", 0.15),
    ("55+",   0.10),
];

const PROCESSING_DAYS: [(u32, f64); 3] = [(1, 0.7), (2, 0.2), (3, 0.1)];
const INSTALLMENT_PLANS: [(u32, f64); 5] = [(1, 0.30), (3, 0.25), (6, 0.20), (12, 0.15), (18, 0.10)];

const ISSUE_WEIGHTS_ON_TIME: [(DeliveryIssue, f64); 5] = [
    (DeliveryIssue::None,         0.85),
    (DeliveryIssue::Delay,        0.10),
    (DeliveryIssue::Damaged,      0.03),
    (DeliveryIssue::Lost,         0.01),
    (DeliveryIssue::Misdelivered, 0.01),
];
const ISSUE_WEIGHTS_DELAYED: [(DeliveryIssue, f64); 5] = [
    (DeliveryIssue::None,         0.70),
    (DeliveryIssue::Delay,        0.20),
    (DeliveryIssue::Damaged,      0.05),
    (DeliveryIssue::Lost,         0.03),
    (DeliveryIssue::Misdelivered, 0.02),
];

pub const LOYALTY_MEAN_MONTHS: f64 = 12.0;
pub const LOYALTY_CAP_MONTHS: u32 = 60;
pub const PURCHASE_FREQUENCY_MEAN: f64 = 2.5;
pub const TRANSIT_JITTER_STD_DAYS: f64 = 0.5;

const SMALL_ORDER_PROBABILITY: f64 = 0.95;
const EXPRESS_PROBABILITY: f64 = 0.15;
const EXPRESS_PROMISE_REDUCTION: i64 = 2;
const PEAK_SLOWDOWN: (f64, f64) = (1.2, 2.0);
const COST_PER_KG: f64 = 15.0;
const COST_NOISE: (f64, f64) = (0.9, 1.1);
const AUTHORIZED_SHARE: f64 = 0.67;
const UNDER_REVIEW_SHARE: f64 = 0.8;
const URBAN_SHARE: f64 = 0.75;
const DELAY_ISSUE_THRESHOLD: i64 = 2;
const FREQUENT_CUSTOMER_THRESHOLD: u32 = 3;
const LOYAL_CUSTOMER_THRESHOLD: u32 = 12;
const HIGH_VALUE_THRESHOLD: f64 = 5_000.0;

struct CustomerDraw {
    age_group: &'static str,
    loyalty_months: u32,
    purchase_frequency: u32,
    state: &'static str,
    region: &'static str,
}

struct ProductDraw<'a> {
    category: &'a CategoryProfile,
    price: f64,
    weight_kg: f64,
    quantity: u32,
}

struct TimingDraw {
    order_date: NaiveDateTime,
    shipped_date: NaiveDateTime,
    delivered_date: NaiveDateTime,
    processing_days: u32,
    delivery_days: i64,
    peak: bool,
}

struct PaymentDraw {
    method: &'static str,
    status: TransactionStatus,
    installments: u32,
}

pub struct RecordSynthesizer {
    tables: ReferenceTables,
    anchor: NaiveDateTime,
    carrier_weights: Vec<(usize, f64)>,
    category_weights: Vec<(usize, f64)>,
    loyalty: Exp<f64>,
    frequency: Poisson<f64>,
    transit_jitter: Normal<f64>,
}

impl RecordSynthesizer {
    pub fn new(tables: ReferenceTables, anchor: NaiveDateTime) -> GenResult<Self> {
        let loyalty = Exp::new(1.0 / LOYALTY_MEAN_MONTHS).map_err(|e| GenError::Distribution {
            name: "loyalty_months",
            reason: e.to_string(),
        })?;
        let frequency = Poisson::new(PURCHASE_FREQUENCY_MEAN).map_err(|e| GenError::Distribution {
            name: "purchase_frequency",
            reason: e.to_string(),
        })?;
        let transit_jitter =
            Normal::new(0.0, TRANSIT_JITTER_STD_DAYS).map_err(|e| GenError::Distribution {
                name: "transit_jitter",
                reason: e.to_string(),
            })?;
        Ok(Self {
            carrier_weights: tables.carrier_weights(),
            category_weights: tables.category_weights(),
            tables,
            anchor,
            loyalty,
            frequency,
            transit_jitter,
        })
    }

    pub fn tables(&self) -> &ReferenceTables {
        &self.tables
    }

    /// Produce the record at position `seq` in generation order.
    pub fn produce_record<R: Rng + ?Sized>(&self, seq: usize, rng: &mut R) -> OrderRecord {
        let order_id = format!("{ORDER_ID_PREFIX}{seq:05}");
        let customer_id = format!("CUST-{}", rng.gen_range(10_000..=99_999u32));

        let customer = self.draw_customer(rng);
        let product = self.draw_product(rng);

        let carrier = &self.tables.carriers[*rng.pick_weighted(&self.carrier_weights)];
        let tier = if rng.chance(EXPRESS_PROBABILITY) {
            ShippingTier::Express
        } else {
            ShippingTier::Standard
        };
        let distance_tier = classify_distance(&self.tables, customer.state);
        let timing = self.draw_timing(carrier, distance_tier, rng);

        let (km_lo, km_hi) = distance_tier.km_range();
        let distance_km = rng.gen_range(km_lo..km_hi);

        let noise = rng.uniform(COST_NOISE.0, COST_NOISE.1);
        let cost = shipping_cost(carrier.base_cost, product.weight_kg, distance_tier, tier, noise);
        let total = round_to(product.price * f64::from(product.quantity) + cost, 2);

        let payment = self.draw_payment(rng);
        let platform = *rng.pick_weighted(&self.tables.sales_channels);
        let channel = if platform == OWN_SITE_CHANNEL {
            ChannelType::Direct
        } else {
            ChannelType::Marketplace
        };

        let promised = promised_days(carrier.transit.for_tier(distance_tier), tier);
        let actual = whole_days_between(&timing.shipped_date, &timing.delivered_date);
        let delay = actual - promised;

        let rating = jitter_rating(base_rating(delay), rng.gen_range(-1..=1));
        let issue = *rng.pick_weighted(issue_weights(delay));
        let urban = rng.chance(URBAN_SHARE);

        OrderRecord {
            order_id,
            customer_id,
            order_date: timing.order_date,
            shipped_date: timing.shipped_date,
            delivered_date: timing.delivered_date,
            processing_days: timing.processing_days,
            delivery_days: timing.delivery_days,
            promised_delivery_days: promised,
            actual_delivery_days: actual,
            delivery_delay_days: delay,
            delivery_met_promise: flag(delay <= 0),
            product_category: product.category.name.to_string(),
            product_price_mxn: Some(product.price),
            product_weight_kg: product.weight_kg,
            quantity: product.quantity,
            total_amount_mxn: total,
            shipping_carrier: carrier.name.to_string(),
            shipping_tier: tier,
            shipping_cost_mxn: Some(cost),
            distance_km: Some(distance_km),
            shipping_type: distance_tier,
            customer_state: customer.state.to_string(),
            customer_region: customer.region.to_string(),
            customer_age_group: customer.age_group.to_string(),
            customer_loyalty_months: Some(customer.loyalty_months),
            purchase_frequency: customer.purchase_frequency,
            is_urban: flag(urban),
            payment_method: payment.method.to_string(),
            transaction_status: payment.status,
            payment_installments: payment.installments,
            sales_channel: channel,
            platform_name: platform.to_string(),
            is_peak_season: flag(timing.peak),
            customer_delivery_rating: rating,
            delivery_issue: issue,
            shipping_cost_to_price_ratio: round_to(cost / product.price, 4),
            is_frequent_customer: flag(customer.purchase_frequency > FREQUENT_CUSTOMER_THRESHOLD),
            is_loyal_customer: flag(customer.loyalty_months > LOYAL_CUSTOMER_THRESHOLD),
            high_value_order: flag(total > HIGH_VALUE_THRESHOLD),
        }
    }

    fn draw_customer<R: Rng + ?Sized>(&self, rng: &mut R) -> CustomerDraw {
        let age_group = *rng.pick_weighted(&AGE_GROUPS);
        let tenure: f64 = self.loyalty.sample(rng);
        let loyalty_months = (tenure as u32).min(LOYALTY_CAP_MONTHS);
        let purchases: f64 = self.frequency.sample(rng);
        let state = *rng.pick_uniform(&self.tables.states);
        CustomerDraw {
            age_group,
            loyalty_months,
            purchase_frequency: purchases as u32,
            state,
            region: self.tables.region_or_default(state),
        }
    }

    fn draw_product<R: Rng + ?Sized>(&self, rng: &mut R) -> ProductDraw<'_> {
        let category = &self.tables.categories[*rng.pick_weighted(&self.category_weights)];
        let price = round_to(rng.uniform(category.min_price, category.max_price), 2);
        let weight_kg = round_to(rng.uniform(category.weight_kg.0, category.weight_kg.1), 2);
        let quantity = if rng.chance(SMALL_ORDER_PROBABILITY) {
            rng.gen_range(1..=5)
        } else {
            rng.gen_range(6..=10)
        };
        ProductDraw { category, price, weight_kg, quantity }
    }

    fn draw_timing<R: Rng + ?Sized>(
        &self,
        carrier: &CarrierProfile,
        distance_tier: DistanceTier,
        rng: &mut R,
    ) -> TimingDraw {
        let offset = rng.gen_range(0..=ORDER_WINDOW_DAYS * 86_400);
        let order_date = window_start(&self.anchor) + Duration::seconds(offset);

        let processing_days = *rng.pick_weighted(&PROCESSING_DAYS);
        let shipped_date = order_date + Duration::days(i64::from(processing_days));
        let peak = is_peak_season(&order_date);

        let base = f64::from(carrier.transit.for_tier(distance_tier));
        let jitter: f64 = self.transit_jitter.sample(rng);
        let slowdown = if peak {
            rng.uniform(PEAK_SLOWDOWN.0, PEAK_SLOWDOWN.1)
        } else {
            1.0
        };
        let transit = ((base * slowdown + jitter).round() as i64).max(1);
        let delivery_days = (transit + rng.gen_range(-1..=1)).max(1);
        let delivered_date = shipped_date + Duration::days(delivery_days);

        TimingDraw {
            order_date,
            shipped_date,
            delivered_date,
            processing_days,
            delivery_days,
            peak,
        }
    }

    fn draw_payment<R: Rng + ?Sized>(&self, rng: &mut R) -> PaymentDraw {
        let method = *rng.pick_weighted(&self.tables.payment_methods);
        let status = if rng.chance(AUTHORIZED_SHARE) {
            TransactionStatus::Authorized
        } else if rng.chance(UNDER_REVIEW_SHARE) {
            TransactionStatus::UnderReview
        } else {
            TransactionStatus::Rejected
        };
        let installments = if method == CREDIT_CARD && status == TransactionStatus::Authorized {
            *rng.pick_weighted(&INSTALLMENT_PLANS)
        } else {
            1
        };
        PaymentDraw { method, status, installments }
    }
}

/// Tier of a shipment from the fixed origin state to `state`.
pub fn classify_distance(tables: &ReferenceTables, state: &str) -> DistanceTier {
    if state == ORIGIN_STATE {
        DistanceTier::Local
    } else if tables.region_or_default(state) == tables.region_or_default(ORIGIN_STATE) {
        DistanceTier::Regional
    } else {
        DistanceTier::National
    }
}

/// Days promised at checkout. Express shaves two days, never below one.
pub fn promised_days(base_transit: u32, tier: ShippingTier) -> i64 {
    let base = i64::from(base_transit);
    if tier.is_express() {
        (base - EXPRESS_PROMISE_REDUCTION).max(1)
    } else {
        base
    }
}

/// `noise` is the multiplicative factor drawn from [0.9, 1.1).
pub fn shipping_cost(
    base_cost: f64,
    weight_kg: f64,
    distance_tier: DistanceTier,
    tier: ShippingTier,
    noise: f64,
) -> f64 {
    let raw = (base_cost + weight_kg * COST_PER_KG)
        * distance_tier.cost_multiplier()
        * tier.cost_multiplier();
    round_to(raw * noise, 2)
}

pub fn base_rating(delay_days: i64) -> u8 {
    match delay_days {
        d if d <= 0 => 5,
        d if d <= 2 => 4,
        d if d <= 5 => 3,
        d if d <= 10 => 2,
        _ => 1,
    }
}

pub fn jitter_rating(base: u8, jitter: i8) -> u8 {
    (i16::from(base) + i16::from(jitter)).clamp(1, 5) as u8
}

pub fn issue_weights(delay_days: i64) -> &'static [(DeliveryIssue, f64); 5] {
    if delay_days > DELAY_ISSUE_THRESHOLD {
        &ISSUE_WEIGHTS_DELAYED
    } else {
        &ISSUE_WEIGHTS_ON_TIME
    }
}
