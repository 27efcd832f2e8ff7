//! # Sample Dataset
//!
//! The static content ShipTalk boots with. Built once at startup and handed
//! to the owning stores; nothing here is read again after that.

use crate::core::model::{AssistantAnswer, Category, ChatMessage, Comment, Post, Reference};
use crate::core::sidebar::{Expert, TrendingGroup, VirtualEvent};

fn comment(id: i64, author: &str, date: &str, content: &str) -> Comment {
    Comment {
        id,
        author: author.to_string(),
        content: content.to_string(),
        date: date.to_string(),
    }
}

fn post(
    title: &str,
    content: &str,
    upvotes: i64,
    category: Category,
    comments: Vec<Comment>,
) -> Post {
    Post {
        title: title.to_string(),
        content: content.to_string(),
        upvotes,
        category,
        comments,
    }
}

/// The six seed posts, in canonical order.
pub fn sample_posts() -> Vec<Post> {
    vec![
        post(
            "UPS vs FedEx for international B2B shipments",
            "I'm looking to expand my business internationally and I'm torn between UPS and FedEx for B2B shipments. Any experiences or recommendations?",
            24,
            Category::CarrierComparison,
            vec![
                comment(1, "ShippingPro", "2023-06-15", "I've had great experiences with UPS for international shipments. Their tracking is top-notch."),
                comment(2, "LogisticsGuru", "2023-06-16", "FedEx has better rates for heavier packages in my experience."),
                comment(3, "GlobalTrader", "2023-06-17", "It really depends on the specific countries you're shipping to. I'd recommend getting quotes for your most common routes."),
            ],
        ),
        post(
            "Best practices for reducing shipping damages",
            "We've been experiencing an increase in shipping damages lately. What are some best practices you've implemented to reduce damages during transit?",
            18,
            Category::Packaging,
            vec![
                comment(1, "CarefulShipper", "2023-06-14", "Double boxing has significantly reduced our damage rates for fragile items."),
                comment(2, "QualityFirst", "2023-06-15", "We started using custom foam inserts and haven't looked back. It's a bit more expensive but worth it."),
            ],
        ),
        post(
            "New USPS rates impact on small businesses",
            "The new USPS rates are out. How are other small businesses adapting to these changes? Are you considering switching carriers?",
            31,
            Category::CostOptimization,
            vec![
                comment(1, "SmallBizOwner", "2023-06-13", "We're looking into regional carriers for some of our shipments now. The USPS increases are hitting us hard."),
                comment(2, "AdaptiveEntrepreneur", "2023-06-14", "We've started offering local pickup options to offset some of the shipping costs."),
                comment(3, "ShippingNewbie", "2023-06-15", "Considering a switch to UPS SurePost for lighter packages. Anyone have experience with this?"),
            ],
        ),
        post(
            "Eco-friendly packaging solutions for e-commerce",
            "As a small e-commerce business, we're looking to transition to more sustainable packaging. What eco-friendly options have you found effective?",
            42,
            Category::EcoPackaging,
            vec![
                comment(1, "GreenShipper", "2023-06-18", "We've had great success with compostable mailers for smaller items. Our customers love them!"),
                comment(2, "SustainableSender", "2023-06-19", "Recycled cardboard boxes with water-activated paper tape have been our go-to for larger items."),
            ],
        ),
        post(
            "Strategies for optimizing last-mile delivery",
            "Last-mile delivery costs are eating into our profits. What strategies have you implemented to optimize this part of the shipping process?",
            37,
            Category::LastMileInnovation,
            vec![
                comment(1, "InnovativeLogistics", "2023-06-20", "We've partnered with local businesses to set up pickup points. It's reduced our costs significantly."),
                comment(2, "TechSavvyShipper", "2023-06-21", "Implementing route optimization software has helped us plan more efficient delivery routes."),
            ],
        ),
        post(
            "Improving delivery speed without breaking the bank",
            "Our customers are demanding faster shipping times, but expedited shipping is costly. How are you balancing speed and cost?",
            29,
            Category::DeliverySpeed,
            vec![
                comment(1, "SpeedyShipper", "2023-06-22", "We've started using regional carriers for certain areas. They often offer faster delivery at lower costs."),
                comment(2, "StrategicSender", "2023-06-23", "Implementing a multi-warehouse strategy has helped us get products closer to customers before they even order."),
            ],
        ),
    ]
}

/// Messages the live chat opens with.
pub fn seeded_chat() -> Vec<ChatMessage> {
    let seed = |id, author: &str, content: &str| ChatMessage {
        id,
        author: author.to_string(),
        content: content.to_string(),
    };
    vec![
        seed(1, "ShippingPro", "Has anyone tried the new eco-friendly packaging from GreenBox?"),
        seed(2, "LogisticsGuru", "I'm seeing a lot of delays with international shipments lately. Any tips?"),
        seed(3, "NewShipper", "What's the best way to handle returns for an e-commerce business?"),
    ]
}

/// The one answer the simulated assistant ever gives.
pub fn canned_answer() -> AssistantAnswer {
    let reference = |title: &str, id: &str| Reference {
        title: title.to_string(),
        id: id.to_string(),
    };
    AssistantAnswer {
        title: "Shipping Best Practices".to_string(),
        content: "Based on our forum discussions, here are some key shipping best practices: \
            Use appropriate packaging materials to reduce damages. \
            Compare rates between carriers for different shipment types. \
            Implement a multi-carrier strategy for cost optimization. \
            Set up automated tracking alerts for proactive issue resolution. \
            Consider eco-friendly packaging options to appeal to environmentally conscious customers. \
            Optimize last-mile delivery by partnering with local businesses for pickup points. \
            Utilize route optimization software to improve delivery efficiency. \
            For international shipments, thoroughly research country-specific regulations and customs requirements. \
            Regularly review and negotiate carrier contracts to ensure competitive rates. \
            Invest in quality packaging to minimize damages and returns. \
            Implement a robust tracking system to keep customers informed throughout the shipping process. \
            Consider offering multiple shipping options to cater to different customer needs and preferences."
            .to_string(),
        references: vec![
            reference("Reducing shipping damages", "reduce-shipping-damages"),
            reference("Carrier comparison strategies", "carrier-comparison"),
            reference("Cost optimization techniques", "cost-optimization"),
            reference("Effective tracking and communication", "tracking-communication"),
            reference("Eco-friendly shipping solutions", "eco-friendly-shipping"),
        ],
    }
}

pub fn trending_groups() -> Vec<TrendingGroup> {
    vec![
        TrendingGroup::new("Eco-Packaging", 128),
        TrendingGroup::new("Last-Mile Innovation", 95),
        TrendingGroup::new("Cost Optimization", 82),
        TrendingGroup::new("Delivery Speed", 76),
    ]
}

pub fn experts() -> Vec<Expert> {
    vec![
        Expert::new("Sarah Johnson", "International Logistics", true),
        Expert::new("Mike Chen", "Supply Chain Optimization", false),
        Expert::new("Elena Rodriguez", "Customs Regulations", true),
    ]
}

pub fn virtual_events() -> Vec<VirtualEvent> {
    vec![
        VirtualEvent::new("Future of Last-Mile Delivery", "June 15, 2023 at 2:00 PM EST"),
        VirtualEvent::new("Sustainability in Shipping", "June 18, 2023 at 11:00 AM EST"),
    ]
}
