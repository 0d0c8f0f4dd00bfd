//! Exchange offers: placing, accepting and removing mosaic offers.

use crate::schema::Schema;
use crate::TxError;
use sirius_types::constants::KEY_SIZE;
use sirius_types::{Mosaic, MosaicId, PublicAccount};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ExchangeOfferType {
    Sell,
    Buy,
}

impl ExchangeOfferType {
    pub fn value(self) -> u8 {
        match self {
            ExchangeOfferType::Sell => 0,
            ExchangeOfferType::Buy => 1,
        }
    }

    pub fn from_u8(v: u8) -> Option<Self> {
        match v {
            0 => Some(ExchangeOfferType::Sell),
            1 => Some(ExchangeOfferType::Buy),
            _ => None,
        }
    }
}

/// A new offer of `mosaic` for `cost` units of the network currency.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AddExchangeOffer {
    pub mosaic: Mosaic,
    pub cost: u64,
    pub offer_type: ExchangeOfferType,
    pub duration: u64,
}

/// Acceptance of an offer published by `owner`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ExchangeOfferItem {
    pub mosaic: Mosaic,
    pub cost: u64,
    pub offer_type: ExchangeOfferType,
    pub owner: PublicAccount,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct RemoveExchangeOffer {
    pub mosaic_id: MosaicId,
    pub offer_type: ExchangeOfferType,
}

fn check_offers(count: usize) -> Result<(), TxError> {
    if count > u8::MAX as usize {
        return Err(TxError::Invalid(format!("too many offers: {count}")));
    }
    Ok(())
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeOfferAdd {
    offers: Vec<AddExchangeOffer>,
}

impl ExchangeOfferAdd {
    pub fn new(offers: Vec<AddExchangeOffer>) -> Result<Self, TxError> {
        check_offers(offers.len())?;
        Ok(Self { offers })
    }

    pub fn offers(&self) -> &[AddExchangeOffer] {
        &self.offers
    }

    pub(crate) fn schema(&self) -> Schema {
        let rows = self
            .offers
            .iter()
            .map(|o| {
                Schema::new()
                    .u64("mosaicId", o.mosaic.id.id())
                    .u64("mosaicAmount", o.mosaic.amount)
                    .u64("cost", o.cost)
                    .u8("type", o.offer_type.value())
                    .u64("duration", o.duration)
            })
            .collect();
        Schema::new().u8("offersCount", self.offers.len() as u8).table("offers", rows)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeOffer {
    offers: Vec<ExchangeOfferItem>,
}

impl ExchangeOffer {
    pub fn new(offers: Vec<ExchangeOfferItem>) -> Result<Self, TxError> {
        check_offers(offers.len())?;
        Ok(Self { offers })
    }

    pub fn offers(&self) -> &[ExchangeOfferItem] {
        &self.offers
    }

    pub(crate) fn schema(&self) -> Schema {
        let rows = self
            .offers
            .iter()
            .map(|o| {
                Schema::new()
                    .u64("mosaicId", o.mosaic.id.id())
                    .u64("mosaicAmount", o.mosaic.amount)
                    .u64("cost", o.cost)
                    .u8("type", o.offer_type.value())
                    .fixed("owner", o.owner.public_key(), KEY_SIZE)
            })
            .collect();
        Schema::new().u8("offersCount", self.offers.len() as u8).table("offers", rows)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExchangeOfferRemove {
    offers: Vec<RemoveExchangeOffer>,
}

impl ExchangeOfferRemove {
    pub fn new(offers: Vec<RemoveExchangeOffer>) -> Result<Self, TxError> {
        check_offers(offers.len())?;
        Ok(Self { offers })
    }

    pub fn offers(&self) -> &[RemoveExchangeOffer] {
        &self.offers
    }

    pub(crate) fn schema(&self) -> Schema {
        let rows = self
            .offers
            .iter()
            .map(|o| Schema::new().u64("mosaicId", o.mosaic_id.id()).u8("offerType", o.offer_type.value()))
            .collect();
        Schema::new().u8("offersCount", self.offers.len() as u8).table("offers", rows)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use sirius_types::NetworkType;

    #[test]
    fn test_row_sizes() {
        let mosaic = Mosaic::new(MosaicId::new(1), 2);
        let add = ExchangeOfferAdd::new(vec![AddExchangeOffer {
            mosaic,
            cost: 3,
            offer_type: ExchangeOfferType::Buy,
            duration: 4,
        }])
        .unwrap();
        assert_eq!(add.schema().size(), 1 + 33);

        let owner = PublicAccount::new([1; 32], NetworkType::MijinTest);
        let accept = ExchangeOffer::new(vec![ExchangeOfferItem {
            mosaic,
            cost: 3,
            offer_type: ExchangeOfferType::Sell,
            owner,
        }])
        .unwrap();
        assert_eq!(accept.schema().size(), 1 + 57);

        let remove = ExchangeOfferRemove::new(vec![RemoveExchangeOffer {
            mosaic_id: MosaicId::new(1),
            offer_type: ExchangeOfferType::Buy,
        }])
        .unwrap();
        assert_eq!(remove.schema().to_bytes().unwrap(), vec![1, 1, 0, 0, 0, 0, 0, 0, 0, 1]);
    }
}
