mod strength;

pub use strength::{
    ESCALATION_THRESHOLD, HAND_POINTS_BONUS, automated_call, candidate_suit, challenge_suit,
    challenge_value, strongest_suit, suit_strength,
};

use crate::model::card::Card;
use crate::model::hand::Hand;
use crate::model::player::{PLAYER_COUNT, Player, PlayerPosition};
use crate::model::rank::Rank;
use crate::model::suit::Suit;
use crate::model::team::Team;
use crate::policy::{Policy, PolicyError, Rejection};
use core::fmt;
use serde::{Deserialize, Serialize};

/// The winning bid: the called card names the caller's partner and its suit
/// is trump.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Call {
    pub rank: Rank,
    pub suit: Suit,
}

impl Call {
    pub const fn new(rank: Rank, suit: Suit) -> Self {
        Self { rank, suit }
    }

    pub const fn card(self) -> Card {
        Card::new(self.rank, self.suit)
    }
}

impl fmt::Display for Call {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.card())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Bid {
    Pass,
    /// A rank below the last call. `suit` may be left for later; it is asked
    /// for only if this bid wins.
    Call { rank: Rank, suit: Option<Suit> },
}

impl From<Option<Call>> for Bid {
    fn from(value: Option<Call>) -> Self {
        match value {
            Some(call) => Bid::Call {
                rank: call.rank,
                suit: Some(call.suit),
            },
            None => Bid::Pass,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BidRejection {
    /// The last eligible player has not called yet and may not pass.
    PassNotAllowed,
    NotBelowLastCall { last: Rank, offered: Rank },
}

impl fmt::Display for BidRejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BidRejection::PassNotAllowed => write!(f, "the last player left must call"),
            BidRejection::NotBelowLastCall { last, offered } => write!(
                f,
                "call {} is not below the last call {}",
                offered.value(),
                last.value()
            ),
        }
    }
}

/// What a bidder sees when asked for a bid.
#[derive(Debug, Clone, Copy)]
pub struct BidContext<'a> {
    pub seat: PlayerPosition,
    pub hand: &'a Hand,
    pub last_called: Option<Rank>,
    pub leader: Option<PlayerPosition>,
    pub must_call: bool,
}

/// Which players the partner scan considers after calling.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartnerScan {
    /// First holder of the called card in seat order, the caller included.
    /// A caller holding the card therefore plays without a partner.
    #[default]
    FirstHolder,
    /// First holder of the called card other than the caller.
    SkipCaller,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CallingOutcome {
    pub caller: PlayerPosition,
    pub call: Call,
    pub partner: Option<PlayerPosition>,
    pub teams: [Team; PLAYER_COUNT],
    /// Turns taken by eligible players, rejected bids not counted.
    pub visits: usize,
    pub bids: Vec<(PlayerPosition, Bid)>,
}

impl CallingOutcome {
    pub fn trump(&self) -> Suit {
        self.call.suit
    }
}

#[derive(Debug)]
pub enum CallingError {
    Policy {
        seat: PlayerPosition,
        source: PolicyError,
    },
    /// Fewer than two players can take part.
    NotEnoughBidders,
}

impl fmt::Display for CallingError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CallingError::Policy { seat, source } => write!(f, "{seat} could not bid: {source}"),
            CallingError::NotEnoughBidders => write!(f, "calling needs at least two bidders"),
        }
    }
}

impl std::error::Error for CallingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CallingError::Policy { source, .. } => Some(source),
            CallingError::NotEnoughBidders => None,
        }
    }
}

/// Runs the calling phase over the players' real hands.
#[derive(Debug, Clone, Copy, Default)]
pub struct CallingEngine {
    scan: PartnerScan,
}

impl CallingEngine {
    pub const fn new(scan: PartnerScan) -> Self {
        Self { scan }
    }

    pub const fn partner_scan(&self) -> PartnerScan {
        self.scan
    }

    /// Visits eligible players round-robin from seat 0 until a single one is
    /// left, then assigns teams on `players`.
    pub fn run(
        &self,
        players: &mut [Player; PLAYER_COUNT],
        policies: &mut [Box<dyn Policy>],
    ) -> Result<CallingOutcome, CallingError> {
        let mut eligible = players.iter().filter(|p| p.calling).count();
        if eligible < 2 || policies.len() < PLAYER_COUNT {
            return Err(CallingError::NotEnoughBidders);
        }

        let mut last: Option<(Rank, Option<Suit>)> = None;
        let mut leader: Option<PlayerPosition> = None;
        let mut visits = 0usize;
        let mut bids = Vec::new();
        let mut cursor = 0usize;

        while eligible > 1 {
            let seat = PlayerPosition::LOOP[cursor % PLAYER_COUNT];
            cursor += 1;
            if !players[seat.index()].calling {
                continue;
            }
            visits += 1;
            let ctx = BidContext {
                seat,
                hand: &players[seat.index()].hand,
                last_called: last.map(|(rank, _)| rank),
                leader,
                must_call: false,
            };
            let bid = ask(policies[seat.index()].as_mut(), &ctx)?;
            bids.push((seat, bid));
            match bid {
                Bid::Pass => {
                    players[seat.index()].calling = false;
                    eligible -= 1;
                }
                Bid::Call { rank, suit } => {
                    last = Some((rank, suit));
                    leader = Some(seat);
                }
            }
        }

        let caller = players
            .iter()
            .find(|p| p.calling)
            .map(|p| p.position)
            .ok_or(CallingError::NotEnoughBidders)?;

        // Everybody else passed before anyone called.
        if last.is_none() {
            visits += 1;
            let ctx = BidContext {
                seat: caller,
                hand: &players[caller.index()].hand,
                last_called: None,
                leader: None,
                must_call: true,
            };
            let bid = ask(policies[caller.index()].as_mut(), &ctx)?;
            bids.push((caller, bid));
            if let Bid::Call { rank, suit } = bid {
                last = Some((rank, suit));
            }
        }

        let (rank, suit) = last.ok_or(CallingError::NotEnoughBidders)?;
        let suit = match suit {
            Some(suit) => suit,
            None => {
                let ctx = BidContext {
                    seat: caller,
                    hand: &players[caller.index()].hand,
                    last_called: Some(rank),
                    leader: Some(caller),
                    must_call: false,
                };
                policies[caller.index()]
                    .choose_trump(&ctx, rank)
                    .map_err(|source| CallingError::Policy {
                        seat: caller,
                        source,
                    })?
            }
        };
        let call = Call::new(rank, suit);
        let partner = self.assign_teams(players, caller, call);

        Ok(CallingOutcome {
            caller,
            call,
            partner,
            teams: std::array::from_fn(|i| players[i].team),
            visits,
            bids,
        })
    }

    /// Marks the caller and the holder of the called card as the caller side,
    /// everyone else as opposing. Returns the partner when distinct from the
    /// caller.
    pub fn assign_teams(
        &self,
        players: &mut [Player; PLAYER_COUNT],
        caller: PlayerPosition,
        call: Call,
    ) -> Option<PlayerPosition> {
        for player in players.iter_mut() {
            player.team = Team::OpposingSide;
        }
        players[caller.index()].team = Team::CallerSide;

        let holder = players
            .iter()
            .filter(|p| self.scan == PartnerScan::FirstHolder || p.position != caller)
            .find(|p| p.hand.contains(call.card()))
            .map(|p| p.position)?;
        players[holder.index()].team = Team::CallerSide;
        (holder != caller).then_some(holder)
    }
}

/// Asks until the policy gives a bid the rules accept.
fn ask(policy: &mut dyn Policy, ctx: &BidContext<'_>) -> Result<Bid, CallingError> {
    loop {
        let bid = policy
            .choose_bid(ctx)
            .map_err(|source| CallingError::Policy {
                seat: ctx.seat,
                source,
            })?;
        match validate(bid, ctx) {
            Ok(()) => return Ok(bid),
            Err(reason) => policy.rejected(&Rejection::Bid(reason)),
        }
    }
}

pub fn validate(bid: Bid, ctx: &BidContext<'_>) -> Result<(), BidRejection> {
    match (bid, ctx.last_called) {
        (Bid::Pass, _) if ctx.must_call => Err(BidRejection::PassNotAllowed),
        (Bid::Call { rank, .. }, Some(last)) if rank >= last => {
            Err(BidRejection::NotBelowLastCall {
                last,
                offered: rank,
            })
        }
        _ => Ok(()),
    }
}
