namespace! {
    /// Per-address delivery status
    Emails => "emails" {
        get = Get "emails" as "get";
        get_one = Get "emails/{{email}}" as "getOne";
        get_details = Get "emails/{{email}}/details" as "getDetails";
        get_bulk = Post "emails" as "getBulk", serialize ["emails"];
        /// Remove the address from every address book
        remove = Delete "emails/{{email}}" as "remove";
        get_campaigns = Get "emails/{{email}}/campaigns" as "getCampaigns";
        get_campaigns_bulk = Post "emails/campaigns" as "getCampaignsBulk", serialize ["emails"];
    }
}
