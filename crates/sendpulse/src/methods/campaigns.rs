namespace! {
    /// Email campaign operations
    Campaigns => "campaigns" {
        create = Post "campaigns" as "create";
        edit = Patch "campaigns" as "edit";
        get = Get "campaigns" as "get";
        /// Cancel a scheduled campaign
        remove = Delete "campaigns/{{id}}" as "remove";
        get_one = Get "campaigns/{{id}}" as "getOne";
        get_email = Get "campaigns/{{id}}/email/{{email}}" as "getEmail";
        get_countries = Get "campaigns/{{id}}/countries" as "getCountries";
        get_referrals = Get "campaigns/{{id}}/referrals" as "getReferrals";
    }
}
