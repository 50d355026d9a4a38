namespace! {
    /// Account balance
    Balance => "balance" {
        get = Get "balance" as "get";
        get_by_currency = Get "balance/{{currency}}" as "getByCurrency";
        get_detailed = Get "user/balance/detail" as "getDetailed";
    }
}
